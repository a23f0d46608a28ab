// crates/sgs_config/src/les_properties.rs

//! LesProperties - LES 模型属性字典
//!
//! ```json
//! {
//!   "model": "dynamicCubicRoot",
//!   "delta": { "type": "cubeRootVol", "deltaCoeff": 1.0 },
//!   "qrCoeffs": { "ck": 0.094, "ce": 1.048 },
//!   "dynamicCoeffs": { "filter": { "type": "simple" }, "initialCD": 0.0 },
//!   "transport": { "nu": 1.5e-5 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;

/// QR 模型常数 ck 的默认值
pub const DEFAULT_CK: f64 = 0.094;

/// 耗散常数 ce 的默认值
pub const DEFAULT_CE: f64 = 1.048;

/// LES 模型属性
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LesProperties {
    /// 亚格子模型
    #[serde(default)]
    pub model: ModelKind,

    /// 滤波尺度
    #[serde(default)]
    pub delta: DeltaConfig,

    /// QR 模型系数
    #[serde(default)]
    pub qr_coeffs: QrCoeffs,

    /// 动态模型系数
    #[serde(default)]
    pub dynamic_coeffs: DynamicCoeffs,

    /// 输运属性
    #[serde(default)]
    pub transport: TransportConfig,

    /// 构造时输出模型系数
    #[serde(default)]
    pub print_coeffs: bool,
}

impl Default for LesProperties {
    fn default() -> Self {
        Self {
            model: ModelKind::default(),
            delta: DeltaConfig::default(),
            qr_coeffs: QrCoeffs::default(),
            dynamic_coeffs: DynamicCoeffs::default(),
            transport: TransportConfig::default(),
            print_coeffs: false,
        }
    }
}

/// 亚格子模型类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ModelKind {
    /// 等容 QR 代数模型（固定系数）
    #[serde(rename = "qr")]
    Qr,
    /// 动态立方根模型（Germano-Lilly 动态系数）
    #[default]
    #[serde(rename = "dynamicCubicRoot")]
    DynamicCubicRoot,
}

impl ModelKind {
    /// 配置中使用的名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Qr => "qr",
            Self::DynamicCubicRoot => "dynamicCubicRoot",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "qr" | "QR" => Ok(Self::Qr),
            "dynamicCubicRoot" | "dynamic-cubic-root" | "dynamic" => Ok(Self::DynamicCubicRoot),
            other => Err(ConfigError::invalid("model", other, "未知的亚格子模型")),
        }
    }
}

/// 滤波尺度配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", deny_unknown_fields)]
pub enum DeltaConfig {
    /// δ = deltaCoeff · V^(1/3)
    CubeRootVol {
        /// 比例系数
        #[serde(rename = "deltaCoeff", default = "default_delta_coeff")]
        delta_coeff: f64,
    },
    /// 全场统一的 δ
    Uniform {
        /// δ [m]
        value: f64,
    },
}

fn default_delta_coeff() -> f64 {
    1.0
}

impl Default for DeltaConfig {
    fn default() -> Self {
        Self::CubeRootVol {
            delta_coeff: default_delta_coeff(),
        }
    }
}

/// QR 模型系数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QrCoeffs {
    /// 模型常数 ck（缺省时保留原值，首次构造取 [`DEFAULT_CK`]）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ck: Option<f64>,

    /// 耗散常数 ce
    #[serde(default = "default_ce")]
    pub ce: f64,
}

fn default_ce() -> f64 {
    DEFAULT_CE
}

impl Default for QrCoeffs {
    fn default() -> Self {
        Self {
            ck: None,
            ce: default_ce(),
        }
    }
}

impl QrCoeffs {
    /// ck，缺省时取默认值
    pub fn ck_or_default(&self) -> f64 {
        self.ck.unwrap_or(DEFAULT_CK)
    }
}

/// 测试滤波器配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "camelCase", deny_unknown_fields)]
pub enum FilterConfig {
    /// 面插值-面积加权平均
    #[default]
    Simple,
    /// 单元及其面邻居的体积加权平均
    Box,
}

impl FilterConfig {
    /// 配置中使用的名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Box => "box",
        }
    }
}

/// 动态模型系数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DynamicCoeffs {
    /// 测试滤波器
    #[serde(default)]
    pub filter: FilterConfig,

    /// 耗散常数 ce（用于 ε = ce·k^1.5/δ）
    #[serde(default = "default_ce")]
    pub ce: f64,

    /// cD 的初始值（分母病态时保留的值）
    #[serde(rename = "initialCD", default)]
    pub initial_cd: f64,

    /// cI 的初始值
    #[serde(rename = "initialCI", default)]
    pub initial_ci: f64,

    /// 动态比值分母判零阈值
    #[serde(rename = "denominatorTolerance", default = "default_denominator_tolerance")]
    pub denominator_tolerance: f64,
}

fn default_denominator_tolerance() -> f64 {
    1e-30
}

impl Default for DynamicCoeffs {
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            ce: default_ce(),
            initial_cd: 0.0,
            initial_ci: 0.0,
            denominator_tolerance: default_denominator_tolerance(),
        }
    }
}

/// 输运属性
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransportConfig {
    /// 分子运动粘性 [m²/s]
    #[serde(default = "default_nu")]
    pub nu: f64,
}

fn default_nu() -> f64 {
    1.5e-5
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self { nu: default_nu() }
    }
}

impl LesProperties {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// 从 JSON 字符串解析并校验
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let props: LesProperties =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        props.validate()?;
        Ok(props)
    }

    /// 序列化为格式化 JSON
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 按模型类型创建默认配置
    pub fn for_model(model: ModelKind) -> Self {
        Self {
            model,
            ..Default::default()
        }
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.delta {
            DeltaConfig::CubeRootVol { delta_coeff } => {
                require_positive("delta.deltaCoeff", delta_coeff)?;
            }
            DeltaConfig::Uniform { value } => {
                require_positive("delta.value", value)?;
            }
        }

        if let Some(ck) = self.qr_coeffs.ck {
            require_positive("qrCoeffs.ck", ck)?;
        }
        require_positive("qrCoeffs.ce", self.qr_coeffs.ce)?;

        let dynamic = &self.dynamic_coeffs;
        require_positive("dynamicCoeffs.ce", dynamic.ce)?;
        require_finite("dynamicCoeffs.initialCD", dynamic.initial_cd)?;
        require_finite("dynamicCoeffs.initialCI", dynamic.initial_ci)?;
        require_non_negative(
            "dynamicCoeffs.denominatorTolerance",
            dynamic.denominator_tolerance,
        )?;

        require_non_negative("transport.nu", self.transport.nu)?;

        Ok(())
    }
}

fn require_finite(key: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(key, value, "必须为有限数"))
    }
}

fn require_positive(key: &str, value: f64) -> Result<(), ConfigError> {
    require_finite(key, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(key, value, "必须为正"))
    }
}

fn require_non_negative(key: &str, value: f64) -> Result<(), ConfigError> {
    require_finite(key, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(key, value, "不能为负"))
    }
}
