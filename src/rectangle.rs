use crate::error::RTreeError;
use serde::{Deserialize, Serialize};

/// 矩形边界框 - 用于表示R-tree中的最小边界矩形(MBR)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub min: [f64; 2], // [x_min, y_min]
    pub max: [f64; 2], // [x_max, y_max]
}

impl Rectangle {
    /// 创建新的矩形
    ///
    /// 边界无效（min > max）时返回错误，不会构造出非法矩形
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<Self, RTreeError> {
        if x_min > x_max || y_min > y_max {
            return Err(RTreeError::InvalidRectangle {
                min_x: x_min,
                min_y: y_min,
                max_x: x_max,
                max_y: y_max,
            });
        }
        Ok(Rectangle {
            min: [x_min, y_min],
            max: [x_max, y_max],
        })
    }

    /// 创建一个点矩形
    pub fn from_point(x: f64, y: f64) -> Self {
        Rectangle {
            min: [x, y],
            max: [x, y],
        }
    }

    /// 计算矩形面积
    pub fn area(&self) -> f64 {
        (self.max[0] - self.min[0]) * (self.max[1] - self.min[1])
    }

    /// 计算矩形周长
    pub fn perimeter(&self) -> f64 {
        2.0 * ((self.max[0] - self.min[0]) + (self.max[1] - self.min[1]))
    }

    /// 计算两个矩形的并集MBR
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        Rectangle {
            min: [
                self.min[0].min(other.min[0]),
                self.min[1].min(other.min[1]),
            ],
            max: [
                self.max[0].max(other.max[0]),
                self.max[1].max(other.max[1]),
            ],
        }
    }

    /// 判断两个矩形是否相交
    ///
    /// 边界采用闭区间：仅边缘或角接触的矩形也算相交
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.min[0] <= other.max[0]
            && self.max[0] >= other.min[0]
            && self.min[1] <= other.max[1]
            && self.max[1] >= other.min[1]
    }

    /// 判断当前矩形是否包含另一个矩形
    pub fn contains(&self, other: &Rectangle) -> bool {
        self.min[0] <= other.min[0]
            && self.min[1] <= other.min[1]
            && self.max[0] >= other.max[0]
            && self.max[1] >= other.max[1]
    }

    /// 判断当前矩形是否包含一个点（边界上的点也算包含）
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.min[0] <= x && x <= self.max[0] && self.min[1] <= y && y <= self.max[1]
    }

    /// 计算扩大到包含另一个矩形所需的面积增量
    pub fn enlargement(&self, other: &Rectangle) -> f64 {
        self.union(other).area() - self.area()
    }

    /// 计算两个矩形的交集面积，不相交时为0
    pub fn intersection_area(&self, other: &Rectangle) -> f64 {
        if !self.intersects(other) {
            return 0.0;
        }

        let x_overlap = (self.max[0].min(other.max[0])) - (self.min[0].max(other.min[0]));
        let y_overlap = (self.max[1].min(other.max[1])) - (self.min[1].max(other.min[1]));

        x_overlap * y_overlap
    }

    /// 计算矩形中心点
    pub fn center(&self) -> [f64; 2] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
        ]
    }

    /// 计算点到矩形的最小欧几里得距离
    ///
    /// 点在矩形内部或边界上时距离为0
    pub fn distance_to_point(&self, x: f64, y: f64) -> f64 {
        let dx = (self.min[0] - x).max(0.0).max(x - self.max[0]);
        let dy = (self.min[1] - y).max(0.0).max(y - self.max[1]);
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Rectangle {
    /// 退化矩形 (0,0,0,0)，空节点的MBR占位值
    fn default() -> Self {
        Rectangle {
            min: [0.0, 0.0],
            max: [0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_creation() {
        let rect = Rectangle::new(0.0, 0.0, 10.0, 10.0).unwrap();
        assert_eq!(rect.min, [0.0, 0.0]);
        assert_eq!(rect.max, [10.0, 10.0]);
    }

    #[test]
    fn test_rectangle_invalid_bounds() {
        // min > max 应该被拒绝
        assert!(Rectangle::new(10.0, 0.0, 0.0, 10.0).is_err());
        assert!(Rectangle::new(0.0, 10.0, 10.0, 0.0).is_err());

        // 退化为点或线的矩形是合法的
        assert!(Rectangle::new(5.0, 5.0, 5.0, 5.0).is_ok());
        assert!(Rectangle::new(0.0, 5.0, 10.0, 5.0).is_ok());
    }

    #[test]
    fn test_rectangle_area() {
        let rect = Rectangle::new(0.0, 0.0, 10.0, 5.0).unwrap();
        assert_eq!(rect.area(), 50.0);
    }

    #[test]
    fn test_rectangle_perimeter() {
        let rect = Rectangle::new(0.0, 0.0, 10.0, 5.0).unwrap();
        assert_eq!(rect.perimeter(), 30.0);
    }

    #[test]
    fn test_rectangle_union() {
        let rect1 = Rectangle::new(0.0, 0.0, 5.0, 5.0).unwrap();
        let rect2 = Rectangle::new(3.0, 3.0, 8.0, 8.0).unwrap();
        let union = rect1.union(&rect2);
        assert_eq!(union, Rectangle::new(0.0, 0.0, 8.0, 8.0).unwrap());
    }

    #[test]
    fn test_rectangle_intersects() {
        let rect1 = Rectangle::new(0.0, 0.0, 5.0, 5.0).unwrap();
        let rect2 = Rectangle::new(3.0, 3.0, 8.0, 8.0).unwrap();
        let rect3 = Rectangle::new(10.0, 10.0, 15.0, 15.0).unwrap();

        assert!(rect1.intersects(&rect2));
        assert!(!rect1.intersects(&rect3));
    }

    #[test]
    fn test_rectangle_intersects_touching() {
        // 边缘接触：a.maxX == b.minX，闭区间语义下算相交
        let a = Rectangle::new(0.0, 0.0, 5.0, 5.0).unwrap();
        let b = Rectangle::new(5.0, 0.0, 10.0, 5.0).unwrap();
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));

        // 角接触
        let c = Rectangle::new(5.0, 5.0, 10.0, 10.0).unwrap();
        assert!(a.intersects(&c));
        assert_eq!(a.intersection_area(&c), 0.0);
    }

    #[test]
    fn test_rectangle_contains() {
        let rect1 = Rectangle::new(0.0, 0.0, 10.0, 10.0).unwrap();
        let rect2 = Rectangle::new(2.0, 2.0, 8.0, 8.0).unwrap();
        let rect3 = Rectangle::new(5.0, 5.0, 15.0, 15.0).unwrap();

        assert!(rect1.contains(&rect2));
        assert!(!rect1.contains(&rect3));
    }

    #[test]
    fn test_rectangle_contains_point() {
        let rect = Rectangle::new(0.0, 0.0, 10.0, 10.0).unwrap();
        assert!(rect.contains_point(5.0, 5.0));
        assert!(!rect.contains_point(15.0, 15.0));

        // 边界上的点
        assert!(rect.contains_point(0.0, 0.0));
        assert!(rect.contains_point(10.0, 10.0));
        assert!(rect.contains_point(10.0, 5.0));
    }

    #[test]
    fn test_rectangle_enlargement() {
        let rect1 = Rectangle::new(0.0, 0.0, 5.0, 5.0).unwrap();
        let rect2 = Rectangle::new(3.0, 3.0, 8.0, 8.0).unwrap();
        let enlargement = rect1.enlargement(&rect2);
        assert_eq!(enlargement, 39.0); // 8*8 - 5*5 = 64 - 25 = 39
    }

    #[test]
    fn test_rectangle_intersection_area() {
        let rect1 = Rectangle::new(0.0, 0.0, 5.0, 5.0).unwrap();
        let rect2 = Rectangle::new(3.0, 3.0, 8.0, 8.0).unwrap();
        assert_eq!(rect1.intersection_area(&rect2), 4.0); // 2*2

        let rect3 = Rectangle::new(10.0, 10.0, 15.0, 15.0).unwrap();
        assert_eq!(rect1.intersection_area(&rect3), 0.0);
    }

    #[test]
    fn test_distance_to_point_inside() {
        let rect = Rectangle::new(0.0, 0.0, 10.0, 10.0).unwrap();
        assert_eq!(rect.distance_to_point(5.0, 5.0), 0.0);
        // 边界上的点距离也为0
        assert_eq!(rect.distance_to_point(10.0, 5.0), 0.0);
        assert_eq!(rect.distance_to_point(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_distance_to_point_outside() {
        let rect = Rectangle::new(0.0, 0.0, 10.0, 10.0).unwrap();
        // 正右方：只有x方向偏差
        assert_eq!(rect.distance_to_point(13.0, 5.0), 3.0);
        // 对角方向：欧几里得距离
        assert_eq!(rect.distance_to_point(13.0, 14.0), 5.0); // 3-4-5三角形
    }
}
