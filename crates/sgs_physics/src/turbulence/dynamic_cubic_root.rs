// crates/sgs_physics/src/turbulence/dynamic_cubic_root.rs

//! 动态立方根模型（等容动态 Smagorinsky，Germano-Lilly 系数估计）
//!
//! ```text
//! k    = cI · δ² · |dev(D)|²
//! νsgs = cD · δ² · |D|
//! ```
//!
//! 每个修正步用测试滤波器 F 估计两个系数：
//!
//! ```text
//! K = ½ (F(U·U) - F(U)·F(U))
//! m = δ² (4|F(D)|² - F(|D|²))
//! L = dev(F(U⊗U) - F(U)⊗F(U))
//! M = δ² (F(|D| dev(D)) - 4 |F(D)| dev(F(D)))
//!
//! cI = <K m>_face / <m m>_face
//! cD = <L:M>_face / <M:M>_face
//! ```
//!
//! `<·>_face` 为面平均。分母（数值上）为零的单元保留上一次的系数；
//! 系数本身不截断为非负，负值（反向散射）由驱动器裁剪粘性处理。
//!
//! # 参考
//!
//! Lilly, D. K. (1992). A proposed modification of the Germano subgrid-scale
//! closure method. Physics of Fluids A, 4(3).

use sgs_config::{DynamicCoeffs, LesProperties};
use sgs_foundation::{Dimensions, SgsError, SgsResult, Tolerance};
use sgs_mesh::FvMesh;

use super::traits::{ClosureInputs, CoefficientReport, SgsClosure};
use crate::fields::{ScalarField, SymmTensorField, VectorField};
use crate::filters::{LesFilter, SpatialFilter};
use crate::numerics::face_average;

/// 面平均后的比值 `<num>_face / <den>_face`
///
/// 分母病态或结果非有限的单元取 `previous` 的值，返回新场和回退单元数。
///
/// # Panics
///
/// `num / den` 的量纲与 `previous` 不一致时 panic。
#[track_caller]
pub fn face_averaged_ratio(
    mesh: &FvMesh,
    numerator: &ScalarField,
    denominator: &ScalarField,
    previous: &ScalarField,
    tolerance: &Tolerance,
) -> (ScalarField, usize) {
    (numerator.dimensions() / denominator.dimensions())
        .assert_same(&previous.dimensions(), "dynamic ratio");

    let num = face_average(mesh, numerator);
    let den = face_average(mesh, denominator);

    let mut fallback = 0;
    let values: Vec<f64> = mesh
        .cells()
        .map(|cell| match tolerance.checked_ratio(num[cell], den[cell]) {
            Some(ratio) => ratio,
            None => {
                fallback += 1;
                previous[cell]
            }
        })
        .collect();

    (
        ScalarField::cells(previous.name(), previous.dimensions(), values),
        fallback,
    )
}

/// 动态立方根模型
///
/// 持有逐单元系数场，不实现 `Clone`。
#[derive(Debug)]
pub struct DynamicCubicRootModel {
    filter: LesFilter,
    cd: ScalarField,
    ci: ScalarField,
    ce: f64,
    tolerance: Tolerance,
}

impl DynamicCubicRootModel {
    /// 从配置创建，系数场取初始值
    pub fn new(mesh: &FvMesh, coeffs: &DynamicCoeffs) -> Self {
        let n = mesh.n_cells();
        Self {
            filter: LesFilter::from_config(&coeffs.filter),
            cd: ScalarField::uniform("cD", Dimensions::DIMLESS, n, coeffs.initial_cd),
            ci: ScalarField::uniform("cI", Dimensions::DIMLESS, n, coeffs.initial_ci),
            ce: coeffs.ce,
            tolerance: Tolerance::default().with_denominator(coeffs.denominator_tolerance),
        }
    }

    /// 测试滤波器
    pub fn filter(&self) -> &LesFilter {
        &self.filter
    }

    /// 耗散系数 cD
    pub fn cd(&self) -> &ScalarField {
        &self.cd
    }

    /// 各向同性系数 cI
    pub fn ci(&self) -> &ScalarField {
        &self.ci
    }

    /// 比值分母判零阈值
    pub fn denominator_tolerance(&self) -> f64 {
        self.tolerance.denominator
    }

    /// 恢复系数场（续算）
    pub fn restore_coefficients(&mut self, cd: ScalarField, ci: ScalarField) -> SgsResult<()> {
        for field in [&cd, &ci] {
            if field.len() != self.cd.len() {
                return Err(SgsError::size_mismatch(
                    "dynamic coefficient",
                    self.cd.len(),
                    field.len(),
                ));
            }
            field
                .dimensions()
                .check_same(&Dimensions::DIMLESS, "restore dynamic coefficient")?;
        }
        self.cd = cd.renamed("cD");
        self.ci = ci.renamed("cI");
        Ok(())
    }

    /// cD = <L:M>_face / <M:M>_face
    fn calc_cd(
        &mut self,
        mesh: &FvMesh,
        velocity: &VectorField,
        strain_rate: &SymmTensorField,
        delta2: &ScalarField,
        filtered_u: &VectorField,
        filtered_d: &SymmTensorField,
    ) -> usize {
        let filter = &self.filter;

        let l = (&filter.apply(mesh, &velocity.sqr()) - &filtered_u.sqr()).dev();

        let mag_d_dev_d = &strain_rate.mag() * &strain_rate.dev();
        let mag_fd_dev_fd = &filtered_d.mag() * &filtered_d.dev();
        let m = delta2 * &(&filter.apply(mesh, &mag_d_dev_d) - &(&mag_fd_dev_fd * 4.0));

        let (cd, fallback) = face_averaged_ratio(
            mesh,
            &l.double_dot(&m),
            &m.double_dot(&m),
            &self.cd,
            &self.tolerance,
        );
        self.cd = cd;
        fallback
    }

    /// cI = <K m>_face / <m m>_face
    fn calc_ci(
        &mut self,
        mesh: &FvMesh,
        velocity: &VectorField,
        strain_rate: &SymmTensorField,
        delta2: &ScalarField,
        filtered_u: &VectorField,
        filtered_d: &SymmTensorField,
    ) -> usize {
        let filter = &self.filter;

        let k = &(&filter.apply(mesh, &velocity.mag_sqr()) - &filtered_u.mag_sqr()) * 0.5;
        let m = delta2
            * &(&(&filtered_d.mag_sqr() * 4.0) - &filter.apply(mesh, &strain_rate.mag_sqr()));

        let (ci, fallback) =
            face_averaged_ratio(mesh, &(&k * &m), &m.sqr(), &self.ci, &self.tolerance);
        self.ci = ci;
        fallback
    }
}

impl SgsClosure for DynamicCubicRootModel {
    fn name(&self) -> &'static str {
        "dynamicCubicRoot"
    }

    fn update_coefficients(&mut self, inputs: &ClosureInputs<'_>) -> CoefficientReport {
        let ClosureInputs {
            mesh,
            velocity,
            strain_rate,
            delta,
        } = *inputs;

        let filtered_u = self.filter.apply(mesh, velocity);
        let filtered_d = self.filter.apply(mesh, strain_rate);
        let delta2 = delta.sqr();

        let cd_fallback =
            self.calc_cd(mesh, velocity, strain_rate, &delta2, &filtered_u, &filtered_d);
        let ci_fallback =
            self.calc_ci(mesh, velocity, strain_rate, &delta2, &filtered_u, &filtered_d);

        log::debug!(
            "动态系数: cD ∈ [{:.4e}, {:.4e}], cI ∈ [{:.4e}, {:.4e}], 回退单元 cD={} cI={}",
            self.cd.min(),
            self.cd.max(),
            self.ci.min(),
            self.ci.max(),
            cd_fallback,
            ci_fallback
        );

        CoefficientReport {
            cd_fallback,
            ci_fallback,
        }
    }

    fn k(&self, strain_rate: &SymmTensorField, delta: &ScalarField) -> ScalarField {
        let ci_delta2 = &self.ci * &delta.sqr();
        (&ci_delta2 * &strain_rate.dev().mag_sqr()).renamed("k")
    }

    fn nu_sgs(&self, strain_rate: &SymmTensorField, delta: &ScalarField) -> ScalarField {
        let cd_delta2 = &self.cd * &delta.sqr();
        (&cd_delta2 * &strain_rate.mag()).renamed("nuSgs")
    }

    fn ce(&self) -> f64 {
        self.ce
    }

    fn read(&mut self, props: &LesProperties) -> bool {
        let coeffs = &props.dynamic_coeffs;
        let mut changed = false;

        if coeffs.filter != self.filter.config() {
            log::warn!(
                "测试滤波器已在构造时绑定为 '{}'，忽略配置中的 '{}'",
                self.filter.name(),
                coeffs.filter.name()
            );
        }
        if coeffs.ce != self.ce {
            log::info!("dynamicCubicRoot ce: {} -> {}", self.ce, coeffs.ce);
            self.ce = coeffs.ce;
            changed = true;
        }
        if coeffs.denominator_tolerance != self.tolerance.denominator {
            log::info!(
                "dynamicCubicRoot denominatorTolerance: {:e} -> {:e}",
                self.tolerance.denominator,
                coeffs.denominator_tolerance
            );
            self.tolerance = self.tolerance.with_denominator(coeffs.denominator_tolerance);
            changed = true;
        }

        changed
    }

    fn is_dynamic(&self) -> bool {
        true
    }
}
