// crates/fc_field/src/dimensions.rs

//! 物理量纲向量
//!
//! 7 个 SI 基本量的指数：质量、长度、时间、温度、物质的量、
//! 电流、发光强度。场文件以 `[0 1 -1 0 0 0 0]` 形式声明。

use std::fmt;
use std::ops::{Div, Mul};

use serde::{Deserialize, Serialize};

/// SI 量纲向量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DimensionSet(pub [i32; 7]);

impl DimensionSet {
    /// 无量纲
    pub const DIMENSIONLESS: Self = Self([0; 7]);
    /// 长度 [m]
    pub const LENGTH: Self = Self([0, 1, 0, 0, 0, 0, 0]);
    /// 时间 [s]
    pub const TIME: Self = Self([0, 0, 1, 0, 0, 0, 0]);
    /// 速度 [m/s]
    pub const VELOCITY: Self = Self([0, 1, -1, 0, 0, 0, 0]);
    /// 运动学压强 [m²/s²]（按单位密度归一）
    pub const KINEMATIC_PRESSURE: Self = Self([0, 2, -2, 0, 0, 0, 0]);
    /// 温度 [K]
    pub const TEMPERATURE: Self = Self([0, 0, 0, 1, 0, 0, 0]);

    /// 各指数
    #[inline]
    pub fn exponents(&self) -> [i32; 7] {
        self.0
    }

    /// 是否无量纲
    #[inline]
    pub fn is_dimensionless(&self) -> bool {
        self.0 == [0; 7]
    }
}

impl Mul for DimensionSet {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut out = [0; 7];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.0[i] + rhs.0[i];
        }
        Self(out)
    }
}

impl Div for DimensionSet {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let mut out = [0; 7];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.0[i] - rhs.0[i];
        }
        Self(out)
    }
}

impl fmt::Display for DimensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {} {} {} {} {} {}]",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5], self.0[6]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(DimensionSet::VELOCITY.exponents(), [0, 1, -1, 0, 0, 0, 0]);
        assert!(DimensionSet::DIMENSIONLESS.is_dimensionless());
        assert!(!DimensionSet::TEMPERATURE.is_dimensionless());
    }

    #[test]
    fn test_arithmetic() {
        // 速度 = 长度 / 时间
        assert_eq!(
            DimensionSet::LENGTH / DimensionSet::TIME,
            DimensionSet::VELOCITY
        );
        // 运动学压强 = 速度²
        assert_eq!(
            DimensionSet::VELOCITY * DimensionSet::VELOCITY,
            DimensionSet::KINEMATIC_PRESSURE
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(DimensionSet::VELOCITY.to_string(), "[0 1 -1 0 0 0 0]");
    }
}
