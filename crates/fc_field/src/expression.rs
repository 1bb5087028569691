// crates/fc_field/src/expression.rs

//! 命名计算剖面
//!
//! 源数据中以内联代码形式出现的入口速度剖面在此建模为
//! 命名的、带版本号的表达式变体：参数显式声明，完备性可以
//! 在不求值的情况下校验。绑定器把它当作不透明能力对待，
//! 真正的求值发生在外部求解器中；[`ParabolicProfile::evaluate`]
//! 仅作为纯函数提供给外部消费方与测试。

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldResult};

/// 抛物线入口剖面
///
/// `f(y) = peak * (1 - ((y - center) / half_width)²)`
///
/// 在 `center ± half_width` 处取 0，在 `center` 处取 `peak`。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParabolicProfile {
    /// 剖面中心坐标
    pub center: f64,
    /// 半宽（中心到零点的距离），必须为正
    pub half_width: f64,
    /// 峰值
    pub peak: f64,
}

impl ParabolicProfile {
    /// 声明关键字
    pub const KEYWORD: &'static str = "parabolicProfile";

    /// 表达式版本号；参数表变更时递增
    pub const VERSION: u32 = 1;

    /// 创建剖面并校验参数
    pub fn new(center: f64, half_width: f64, peak: f64) -> FieldResult<Self> {
        let profile = Self {
            center,
            half_width,
            peak,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// 参数完备性校验（不求值）
    pub fn validate(&self) -> FieldResult<()> {
        for (name, value) in [
            ("center", self.center),
            ("halfWidth", self.half_width),
            ("peak", self.peak),
        ] {
            if !value.is_finite() {
                return Err(FieldError::malformed(format!(
                    "参数 {} 非有限值: {}",
                    name, value
                )));
            }
        }
        if self.half_width <= 0.0 {
            return Err(FieldError::malformed(format!(
                "参数 halfWidth 必须为正: {}",
                self.half_width
            )));
        }
        Ok(())
    }

    /// 求值：坐标处的剖面值
    ///
    /// 纯函数，不依赖任何宿主状态。
    #[inline]
    pub fn evaluate(&self, coord: f64) -> f64 {
        let t = (coord - self.center) / self.half_width;
        self.peak * (1.0 - t * t)
    }
}
