// crates/sgs_foundation/src/tolerance.rs

//! 数值容差配置
//!
//! 通过参数注入传递给需要阈值判断的算子，不提供全局实例。

use serde::{Deserialize, Serialize};

/// 数值容差
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// 极小量（用于避免除零的加性保护）
    pub vsmall: f64,
    /// 小量（几何量判零）
    pub small: f64,
    /// 比值分母判零阈值
    ///
    /// 动态系数 `<num>/<den>` 中 `|den|` 不超过该值时视为病态，
    /// 该单元保留上一次的系数。
    pub denominator: f64,
    /// 裁剪单元比例告警阈值
    pub clip_warn_fraction: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            vsmall: 1e-300,
            small: 1e-15,
            denominator: 1e-30,
            clip_warn_fraction: 0.25,
        }
    }
}

impl Tolerance {
    /// 设置分母判零阈值
    pub fn with_denominator(mut self, denominator: f64) -> Self {
        self.denominator = denominator;
        self
    }

    /// 分母是否（数值上）为零
    #[inline]
    pub fn is_zero_denominator(&self, den: f64) -> bool {
        den.is_nan() || den.abs() <= self.denominator
    }

    /// 几何量是否可忽略
    #[inline]
    pub fn is_negligible(&self, x: f64) -> bool {
        x.abs() < self.small
    }

    /// 比值 `num / den`，分母病态或结果非有限时返回 `None`
    #[inline]
    pub fn checked_ratio(&self, num: f64, den: f64) -> Option<f64> {
        if self.is_zero_denominator(den) {
            return None;
        }
        let ratio = num / den;
        ratio.is_finite().then_some(ratio)
    }
}
