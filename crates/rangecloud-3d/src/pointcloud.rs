use glam::DVec3;

/// A point cloud in world units.
///
/// Points keep the order in which they were produced; for clouds built from a range
/// image this is the row-major scan order of the valid pixels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    // The points in the point cloud.
    points: Vec<[f64; 3]>,
}

impl PointCloud {
    /// Create a new point cloud from points.
    pub fn new(points: Vec<[f64; 3]>) -> Self {
        Self { points }
    }

    /// Create an empty point cloud able to hold `capacity` points.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Append a point to the point cloud.
    #[inline]
    pub fn push(&mut self, point: [f64; 3]) {
        self.points.push(point);
    }

    /// Get the number of points in the point cloud.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the point cloud is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get as reference the points in the point cloud.
    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    /// Iterate over the points in the point cloud.
    pub fn iter(&self) -> std::slice::Iter<'_, [f64; 3]> {
        self.points.iter()
    }

    /// Consume the point cloud and return its points.
    pub fn into_points(self) -> Vec<[f64; 3]> {
        self.points
    }

    /// Flatten the points into a `N x 3` row-major buffer of `f32`.
    pub fn to_flat_f32(&self) -> Vec<f32> {
        self.points
            .iter()
            .flat_map(|p| [p[0] as f32, p[1] as f32, p[2] as f32])
            .collect()
    }

    /// Get the minimum bound of the point cloud, or `None` if it is empty.
    pub fn min_bound(&self) -> Option<DVec3> {
        self.points
            .iter()
            .map(|&p| DVec3::from_array(p))
            .reduce(|a, b| a.min(b))
    }

    /// Get the maximum bound of the point cloud, or `None` if it is empty.
    pub fn max_bound(&self) -> Option<DVec3> {
        self.points
            .iter()
            .map(|&p| DVec3::from_array(p))
            .reduce(|a, b| a.max(b))
    }
}

impl FromIterator<[f64; 3]> for PointCloud {
    fn from_iter<I: IntoIterator<Item = [f64; 3]>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a [f64; 3];
    type IntoIter = std::slice::Iter<'a, [f64; 3]>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointcloud() {
        let pointcloud = PointCloud::new(vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);

        assert_eq!(pointcloud.len(), 2);
        assert!(!pointcloud.is_empty());

        if let Some(p1) = pointcloud.points().last() {
            assert_eq!(p1[0], 1.0);
            assert_eq!(p1[1], 0.0);
            assert_eq!(p1[2], 0.0);
        }
    }

    #[test]
    fn test_bounds() {
        let pointcloud: PointCloud = vec![[1.0, -2.0, 3.0], [-1.0, 4.0, 0.5], [0.0, 0.0, 9.0]]
            .into_iter()
            .collect();

        assert_eq!(pointcloud.min_bound(), Some(DVec3::new(-1.0, -2.0, 0.5)));
        assert_eq!(pointcloud.max_bound(), Some(DVec3::new(1.0, 4.0, 9.0)));

        let empty = PointCloud::default();
        assert_eq!(empty.min_bound(), None);
        assert_eq!(empty.max_bound(), None);
    }

    #[test]
    fn test_to_flat_f32() {
        let mut pointcloud = PointCloud::with_capacity(2);
        pointcloud.push([1.0, 2.0, 3.0]);
        pointcloud.push([4.0, 5.0, 6.5]);

        assert_eq!(
            pointcloud.to_flat_f32(),
            vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.5]
        );
        assert_eq!((&pointcloud).into_iter().count(), 2);
        assert_eq!(pointcloud.into_points().len(), 2);
    }
}
