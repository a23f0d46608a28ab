// crates/sgs_physics/src/turbulence/qr.rs

//! 等容 QR 代数模型
//!
//! 固定系数、无滤波：
//!
//! ```text
//! k    = (2 ck / ce) · δ² · |D|²
//! νsgs = ck · √k · δ
//! ```
//!
//! `nu_sgs` 通过 `k` 计算，二者始终一致。

use sgs_config::{LesProperties, QrCoeffs};

use super::traits::SgsClosure;
use crate::fields::{ScalarField, SymmTensorField};

/// QR 模型
#[derive(Debug, Clone, PartialEq)]
pub struct QrModel {
    ck: f64,
    ce: f64,
}

impl QrModel {
    /// 以给定常数创建
    pub fn new(ck: f64, ce: f64) -> Self {
        Self { ck, ce }
    }

    /// 从配置创建，缺省 ck 取默认值
    pub fn from_coeffs(coeffs: &QrCoeffs) -> Self {
        Self::new(coeffs.ck_or_default(), coeffs.ce)
    }

    /// 模型常数 ck
    pub fn ck(&self) -> f64 {
        self.ck
    }
}

impl SgsClosure for QrModel {
    fn name(&self) -> &'static str {
        "qr"
    }

    fn k(&self, strain_rate: &SymmTensorField, delta: &ScalarField) -> ScalarField {
        let delta2_d2 = &delta.sqr() * &strain_rate.mag_sqr();
        (&delta2_d2 * (2.0 * self.ck / self.ce)).renamed("k")
    }

    fn nu_sgs(&self, strain_rate: &SymmTensorField, delta: &ScalarField) -> ScalarField {
        let k = self.k(strain_rate, delta);
        (&(&k.sqrt() * delta) * self.ck).renamed("nuSgs")
    }

    fn ce(&self) -> f64 {
        self.ce
    }

    fn read(&mut self, props: &LesProperties) -> bool {
        match props.qr_coeffs.ck {
            Some(ck) if ck != self.ck => {
                log::info!("QR 模型 ck: {} -> {}", self.ck, ck);
                self.ck = ck;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::SymmTensor;
    use sgs_config::{ModelKind, DEFAULT_CE, DEFAULT_CK};
    use sgs_foundation::Dimensions;

    fn inputs(magsqr_d: f64, delta: f64) -> (SymmTensorField, ScalarField) {
        // 纯剪切 xy = s: |D|² = 2s²
        let s = (magsqr_d / 2.0).sqrt();
        let d = SymmTensorField::uniform(
            "D",
            Dimensions::RATE,
            3,
            SymmTensor::new(0.0, s, 0.0, 0.0, 0.0, 0.0),
        );
        let delta = ScalarField::uniform("delta", Dimensions::LENGTH, 3, delta);
        (d, delta)
    }

    #[test]
    fn test_reference_values() {
        let model = QrModel::new(0.094, 1.048);
        let (d, delta) = inputs(4.0, 0.01);
        let k = model.k(&d, &delta);
        let nu_sgs = model.nu_sgs(&d, &delta);
        assert_eq!(k.dimensions(), Dimensions::SPECIFIC_ENERGY);
        assert_eq!(nu_sgs.dimensions(), Dimensions::KINEMATIC_VISCOSITY);
        let k_expected = 2.0 * 0.094 / 1.048 * 1e-4 * 4.0;
        assert!((k[0] - k_expected).abs() < 1e-18);
        assert!((k[0] - 7.176e-5).abs() < 1e-8);
        assert!((nu_sgs[0] - 7.9626e-6).abs() < 1e-10);
    }

    #[test]
    fn test_nu_sgs_uses_k() {
        let model = QrModel::new(0.1, 1.0);
        let (d, delta) = inputs(2.5, 0.03);
        let k = model.k(&d, &delta);
        let nu_sgs = model.nu_sgs(&d, &delta);
        for i in 0..3 {
            assert_eq!(nu_sgs[i], k[i].sqrt() * delta[i] * 0.1);
        }
    }

    #[test]
    fn test_zero_strain() {
        let model = QrModel::from_coeffs(&QrCoeffs::default());
        assert_eq!(model.ck(), DEFAULT_CK);
        assert_eq!(model.ce(), DEFAULT_CE);
        let (d, delta) = inputs(0.0, 0.1);
        assert!(model.k(&d, &delta).iter().all(|&k| k == 0.0));
        assert!(model.nu_sgs(&d, &delta).iter().all(|&nu| nu == 0.0));
    }

    #[test]
    fn test_read_updates_ck_only_when_present() {
        let mut model = QrModel::new(0.094, 1.048);
        let mut props = LesProperties::for_model(ModelKind::Qr);

        // 缺省 ck：保留原值
        assert!(!model.read(&props));
        assert_eq!(model.ck(), 0.094);

        props.qr_coeffs.ck = Some(0.094);
        assert!(!model.read(&props));

        props.qr_coeffs.ck = Some(0.12);
        assert!(model.read(&props));
        assert_eq!(model.ck(), 0.12);
        assert!(!model.is_dynamic());
    }
}
