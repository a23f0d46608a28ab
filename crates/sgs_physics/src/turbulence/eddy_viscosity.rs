// crates/sgs_physics/src/turbulence/eddy_viscosity.rs

//! LES 涡粘性闭合驱动器
//!
//! 每个修正步按固定顺序执行：
//!
//! ```text
//! ∇U → D = symm(∇U) → 模型系数 → νsgs → max(νsgs, -ν) → νeff = νsgs + ν
//! ```
//!
//! 裁剪保证 `νeff ≥ 0` 处处成立；νsgs 本身可以为负（反向散射）。
//!
//! 驱动器独占其场，`correct` 需要 `&mut self`，修正期间不能被并发读取。

use std::sync::Arc;

use sgs_config::LesProperties;
use sgs_foundation::{Dimensions, SgsError, SgsResult, Tolerance};
use sgs_mesh::FvMesh;

use super::delta::LesDelta;
use super::flow::{FlowProperties, IncompressibleFlow};
use super::model::SgsModel;
use super::strain_rate::strain_rate;
use super::traits::{ClosureInputs, SgsClosure};
use crate::fields::{ScalarField, SymmTensorField, TensorField, VectorField};
use crate::filters::SpatialFilter;
use crate::numerics::{GradientScheme, GreenGaussGradient};

/// 一次修正步的统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorrectionReport {
    /// cD 保留旧值的单元数
    pub cd_fallback: usize,
    /// cI 保留旧值的单元数
    pub ci_fallback: usize,
    /// νsgs 被裁剪到 -ν 的单元数
    pub clipped: usize,
}

/// LES 涡粘性闭合
#[derive(Debug)]
pub struct LesEddyViscosity<P: FlowProperties = IncompressibleFlow> {
    mesh: Arc<FvMesh>,
    flow: P,
    model: SgsModel,
    gradient: GreenGaussGradient,
    delta_model: LesDelta,
    delta: ScalarField,
    nu: ScalarField,
    nu_sgs: ScalarField,
    nu_eff: ScalarField,
    tolerance: Tolerance,
    report: CorrectionReport,
}

impl<P: FlowProperties> LesEddyViscosity<P> {
    /// 按配置构造
    ///
    /// 分子粘性取自 `flow`；`props.transport` 只供宿主构造 `flow` 使用，
    /// 两者不一致时记录警告。
    pub fn new(mesh: Arc<FvMesh>, props: &LesProperties, flow: P) -> SgsResult<Self> {
        props.validate()?;
        let model = SgsModel::from_properties(&mesh, props);
        let closure = Self::from_parts(mesh, model, LesDelta::from_config(&props.delta), flow)?;

        // ν 只取自 flow，transport.nu 由宿主负责传入
        if closure.nu.iter().any(|&nu| nu != props.transport.nu) {
            log::warn!(
                "transport.nu = {:e} 与流动属性的 ν ∈ [{:e}, {:e}] 不一致，使用后者",
                props.transport.nu,
                closure.nu.min(),
                closure.nu.max()
            );
        }

        if props.print_coeffs {
            match &closure.model {
                SgsModel::Qr(qr) => {
                    log::info!("qr 系数: ck = {}, ce = {}", qr.ck(), qr.ce());
                }
                SgsModel::DynamicCubicRoot(dynamic) => {
                    let coeffs = &props.dynamic_coeffs;
                    log::info!(
                        "dynamicCubicRoot 系数: filter = {}, ce = {}, initialCD = {}, initialCI = {}",
                        dynamic.filter().name(),
                        dynamic.ce(),
                        coeffs.initial_cd,
                        coeffs.initial_ci
                    );
                }
            }
        }
        Ok(closure)
    }

    /// 由已构造的模型和滤波尺度组装
    pub fn from_parts(
        mesh: Arc<FvMesh>,
        model: SgsModel,
        delta_model: LesDelta,
        flow: P,
    ) -> SgsResult<Self> {
        let n = mesh.n_cells();
        let nu = flow.nu(&mesh);
        if nu.len() != n {
            return Err(SgsError::size_mismatch("nu", n, nu.len()));
        }
        nu.dimensions()
            .check_same(&Dimensions::KINEMATIC_VISCOSITY, "molecular viscosity")?;
        if !nu.all_finite() || nu.min() < 0.0 {
            return Err(SgsError::invalid_input("分子粘性必须为非负有限数"));
        }

        if let Some(dynamic) = model.as_dynamic() {
            if dynamic.cd().len() != n {
                return Err(SgsError::size_mismatch("cD", n, dynamic.cd().len()));
            }
        }

        let delta = delta_model.compute(&mesh);
        let nu_sgs = ScalarField::zeros("nuSgs", Dimensions::KINEMATIC_VISCOSITY, n);
        let nu_eff = (&nu_sgs + &nu).renamed("nuEff");
        let tolerance = Tolerance::default();

        log::info!(
            "LES 闭合: 模型 {}, δ {}, {} 单元, δ ∈ [{:.4e}, {:.4e}]",
            model.name(),
            delta_model.name(),
            n,
            delta.min(),
            delta.max()
        );

        Ok(Self {
            mesh,
            flow,
            model,
            gradient: GreenGaussGradient::new(),
            delta_model,
            delta,
            nu,
            nu_sgs,
            nu_eff,
            tolerance,
            report: CorrectionReport::default(),
        })
    }

    // ========== 修正 ==========

    /// 推进一个修正步
    ///
    /// # Panics
    ///
    /// 速度场不是速度量纲或长度与网格不一致时 panic。
    pub fn correct(&mut self, velocity: &VectorField) {
        velocity
            .dimensions()
            .assert_same(&Dimensions::VELOCITY, "correct");

        let grad_u = self.gradient.grad_vector(&self.mesh, velocity);
        let d = strain_rate(&grad_u);

        let coefficients = self.model.update_coefficients(&ClosureInputs {
            mesh: &self.mesh,
            velocity,
            strain_rate: &d,
            delta: &self.delta,
        });

        let raw = self.model.nu_sgs(&d, &self.delta);
        let (nu_sgs, clipped) = raw.clip_min(&-&self.nu);
        self.nu_eff = (&nu_sgs + &self.nu).renamed("nuEff");
        self.nu_sgs = nu_sgs.renamed("nuSgs");

        self.report = CorrectionReport {
            cd_fallback: coefficients.cd_fallback,
            ci_fallback: coefficients.ci_fallback,
            clipped,
        };

        let n = self.mesh.n_cells();
        log::debug!(
            "{} 修正: νsgs ∈ [{:.4e}, {:.4e}], 裁剪 {} / {} 单元",
            self.model.name(),
            self.nu_sgs.min(),
            self.nu_sgs.max(),
            clipped,
            n
        );
        if clipped as f64 > self.tolerance.clip_warn_fraction * n as f64 {
            log::warn!(
                "{} 个单元 ({:.1}%) 的 νsgs 被裁剪到 -ν",
                clipped,
                100.0 * clipped as f64 / n as f64
            );
        }
    }

    /// 重新读取配置，返回是否有系数变化
    ///
    /// 已计算的 νsgs / νeff 不受影响，变化从下一个修正步起生效。
    /// 校验失败的配置整体被拒绝：记录错误，状态不变，返回 `false`。
    pub fn read(&mut self, props: &LesProperties) -> bool {
        if let Err(e) = props.validate() {
            log::error!("忽略无效的 LES 配置: {}", e);
            return false;
        }

        let mut changed = self.model.read(props);

        let delta_model = LesDelta::from_config(&props.delta);
        if delta_model != self.delta_model {
            log::info!(
                "滤波尺度: {:?} -> {:?}",
                self.delta_model.config(),
                delta_model.config()
            );
            self.delta = delta_model.compute(&self.mesh);
            self.delta_model = delta_model;
            changed = true;
        }

        changed
    }

    // ========== 导出量 ==========

    /// 速度梯度
    fn grad_u(&self, velocity: &VectorField) -> TensorField {
        velocity
            .dimensions()
            .assert_same(&Dimensions::VELOCITY, "velocity gradient");
        self.gradient.grad_vector(&self.mesh, velocity)
    }

    /// 亚格子动能（按当前速度梯度重新计算，不缓存）
    pub fn k(&self, velocity: &VectorField) -> ScalarField {
        let d = strain_rate(&self.grad_u(velocity));
        self.model.k(&d, &self.delta)
    }

    /// 亚格子耗散率 `ε = ce · k^1.5 / δ`
    pub fn epsilon(&self, velocity: &VectorField) -> ScalarField {
        let k15 = self.k(velocity).powf(1.5);
        (&(&k15 / &self.delta) * self.model.ce()).renamed("epsilon")
    }

    /// 亚格子应力 `B = ⅔ k I - 2 νsgs dev(D)`
    pub fn r(&self, velocity: &VectorField) -> SymmTensorField {
        let d = strain_rate(&self.grad_u(velocity));
        let k = self.model.k(&d, &self.delta);
        let isotropic = &SymmTensorField::isotropic(&k) * (2.0 / 3.0);
        let anisotropic = &(&self.nu_sgs * &d.dev()) * 2.0;
        (&isotropic - &anisotropic).renamed("R")
    }

    /// 有效偏应力 `-νeff dev(2 symm(∇U))`
    pub fn dev_reff(&self, velocity: &VectorField) -> SymmTensorField {
        let two_d = self.grad_u(velocity).two_symm().dev();
        (-&(&self.nu_eff * &two_d)).renamed("devReff")
    }

    /// 带密度和相分数的有效偏应力 `-ρ α νeff dev(2 symm(∇U))`
    pub fn dev_rho_reff(&self, velocity: &VectorField) -> SymmTensorField {
        let rho_alpha = &self.flow.density(&self.mesh) * &self.flow.phase_fraction(&self.mesh);
        let mu_eff = &rho_alpha * &self.nu_eff;
        let two_d = self.grad_u(velocity).two_symm().dev();
        (-&(&mu_eff * &two_d)).renamed("devRhoReff")
    }

    // ========== 访问器 ==========

    /// 模型名称
    pub fn name(&self) -> &'static str {
        self.model.name()
    }

    /// 网格
    pub fn mesh(&self) -> &Arc<FvMesh> {
        &self.mesh
    }

    /// 流动属性
    pub fn flow(&self) -> &P {
        &self.flow
    }

    /// 当前模型
    pub fn model(&self) -> &SgsModel {
        &self.model
    }

    /// 可变模型（续算时恢复系数）
    pub fn model_mut(&mut self) -> &mut SgsModel {
        &mut self.model
    }

    /// 滤波尺度 δ
    pub fn delta(&self) -> &ScalarField {
        &self.delta
    }

    /// 分子粘性 ν
    pub fn nu(&self) -> &ScalarField {
        &self.nu
    }

    /// 亚格子粘性 νsgs（已裁剪）
    pub fn nu_sgs(&self) -> &ScalarField {
        &self.nu_sgs
    }

    /// 有效粘性 νeff
    pub fn nu_eff(&self) -> &ScalarField {
        &self.nu_eff
    }

    /// 最近一次修正的统计
    pub fn last_report(&self) -> CorrectionReport {
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldLocation;
    use glam::DVec3;
    use sgs_config::ModelKind;
    use sgs_mesh::BoxMeshBuilder;

    fn mesh(n: usize) -> Arc<FvMesh> {
        Arc::new(
            BoxMeshBuilder::new(n, n, n)
                .with_lengths(1.0, 1.0, 1.0)
                .periodic_all()
                .build()
                .unwrap(),
        )
    }

    fn shear_velocity(mesh: &FvMesh) -> VectorField {
        VectorField::from_fn(
            "U",
            Dimensions::VELOCITY,
            FieldLocation::Cell,
            mesh.n_cells(),
            |cell| {
                let c = mesh.cell_centre(cell);
                let two_pi = 2.0 * std::f64::consts::PI;
                DVec3::new((two_pi * c.y).sin(), (two_pi * c.z).sin(), 0.0)
            },
        )
    }

    #[test]
    fn test_new_initial_state() {
        let mesh = mesh(3);
        let props = LesProperties::for_model(ModelKind::Qr);
        let les = LesEddyViscosity::new(mesh, &props, IncompressibleFlow::new(2e-5)).unwrap();
        assert_eq!(les.name(), "qr");
        assert!(les.nu_sgs().iter().all(|&v| v == 0.0));
        assert!(les.nu_eff().iter().all(|&v| v == 2e-5));
        assert_eq!(les.delta().dimensions(), Dimensions::LENGTH);
        assert!((les.delta()[0] - 1.0 / 3.0).abs() < 1e-14);
        assert_eq!(les.last_report(), CorrectionReport::default());
    }

    #[test]
    fn test_new_rejects_invalid_properties() {
        let mut props = LesProperties::for_model(ModelKind::Qr);
        props.qr_coeffs.ck = Some(-1.0);
        let err = LesEddyViscosity::new(mesh(2), &props, IncompressibleFlow::new(1e-5)).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_new_rejects_negative_viscosity() {
        let props = LesProperties::for_model(ModelKind::Qr);
        assert!(LesEddyViscosity::new(mesh(2), &props, IncompressibleFlow::new(-1.0)).is_err());
    }

    #[test]
    fn test_correct_qr_positive_viscosity() {
        let mesh = mesh(8);
        let u = shear_velocity(&mesh);
        let props = LesProperties::for_model(ModelKind::Qr);
        let mut les = LesEddyViscosity::new(mesh, &props, IncompressibleFlow::new(1e-5)).unwrap();
        les.correct(&u);

        assert!(les.nu_sgs().iter().all(|&v| v >= 0.0));
        assert!(les.nu_sgs().max() > 0.0);
        assert_eq!(les.last_report().clipped, 0);
        for i in 0..les.nu_eff().len() {
            assert_eq!(les.nu_eff()[i], les.nu_sgs()[i] + 1e-5);
        }
        assert_eq!(les.nu_eff().dimensions(), Dimensions::KINEMATIC_VISCOSITY);
    }

    #[test]
    fn test_derived_quantities() {
        let mesh = mesh(6);
        let u = shear_velocity(&mesh);
        let props = LesProperties::for_model(ModelKind::Qr);
        let mut les = LesEddyViscosity::new(mesh, &props, IncompressibleFlow::new(1e-5)).unwrap();
        les.correct(&u);

        let k = les.k(&u);
        let eps = les.epsilon(&u);
        assert_eq!(eps.dimensions(), Dimensions::DISSIPATION);
        for i in 0..k.len() {
            let expected = props.qr_coeffs.ce * k[i].powf(1.5) / les.delta()[i];
            assert!((eps[i] - expected).abs() <= 1e-12 * expected.abs().max(1e-30));
        }

        // tr(B) = 2k
        let r = les.r(&u);
        assert_eq!(r.dimensions(), Dimensions::SPECIFIC_ENERGY);
        for i in 0..k.len() {
            assert!((r[i].tr() - 2.0 * k[i]).abs() < 1e-12);
        }

        // 不可压: ρ = α = 1，两种有效应力一致
        let dev_reff = les.dev_reff(&u);
        let dev_rho_reff = les.dev_rho_reff(&u);
        assert_eq!(dev_reff.values(), dev_rho_reff.values());
        assert!(dev_reff.iter().all(|t| t.tr().abs() < 1e-12));
    }

    #[test]
    fn test_read_changes_delta() {
        let mut props = LesProperties::for_model(ModelKind::Qr);
        let mut les = LesEddyViscosity::new(mesh(2), &props, IncompressibleFlow::new(1e-5)).unwrap();
        assert!(!les.read(&props));

        props.delta = sgs_config::DeltaConfig::Uniform { value: 0.1 };
        assert!(les.read(&props));
        assert!(les.delta().iter().all(|&d| d == 0.1));
        assert!(!les.read(&props));
    }

    #[test]
    fn test_read_rejects_invalid_properties() {
        let mesh = mesh(6);
        let u = shear_velocity(&mesh);
        let mut props = LesProperties::for_model(ModelKind::Qr);
        let mut les = LesEddyViscosity::new(mesh, &props, IncompressibleFlow::new(1e-5)).unwrap();
        les.correct(&u);
        let nu_eff = les.nu_eff().clone();
        let delta = les.delta().clone();

        props.qr_coeffs.ck = Some(-0.1);
        assert!(!les.read(&props));
        match les.model() {
            SgsModel::Qr(qr) => assert_eq!(qr.ck(), sgs_config::DEFAULT_CK),
            other => panic!("unexpected model {:?}", other.kind()),
        }

        props.qr_coeffs.ck = None;
        props.delta = sgs_config::DeltaConfig::Uniform { value: 0.0 };
        assert!(!les.read(&props));
        assert_eq!(les.delta(), &delta);

        les.correct(&u);
        assert_eq!(les.nu_eff(), &nu_eff);
        assert_eq!(les.last_report().clipped, 0);
        assert!(les.epsilon(&u).all_finite());
    }

    #[test]
    fn test_viscosity_comes_from_flow() {
        let mut props = LesProperties::for_model(ModelKind::Qr);
        props.transport.nu = 1e-3;
        let les = LesEddyViscosity::new(mesh(2), &props, IncompressibleFlow::new(2e-5)).unwrap();
        assert!(les.nu().iter().all(|&nu| nu == 2e-5));
        assert!(les.nu_eff().iter().all(|&nu| nu == 2e-5));
    }

    #[test]
    #[should_panic(expected = "量纲不一致")]
    fn test_correct_rejects_wrong_dimensions() {
        let mesh = mesh(2);
        let props = LesProperties::for_model(ModelKind::Qr);
        let u = VectorField::zeros("U", Dimensions::LENGTH, mesh.n_cells());
        let mut les = LesEddyViscosity::new(mesh, &props, IncompressibleFlow::new(1e-5)).unwrap();
        les.correct(&u);
    }
}
