// apps/sgs_cli/src/commands/run.rs

//! 运行闭合命令
//!
//! 在 `[0, 2π]³` 周期盒上构造 Taylor-Green 涡速度场，逐步平移相位并
//! 调用 `correct`，输出 k、νsgs、νeff 的统计量。

use anyhow::{Context, Result};
use clap::Args;
use glam::DVec3;
use sgs_config::{LesProperties, ModelKind};
use sgs_foundation::Dimensions;
use sgs_mesh::{BoxMeshBuilder, FvMesh};
use sgs_physics::fields::FieldLocation;
use sgs_physics::{IncompressibleFlow, LesEddyViscosity, ScalarField, VectorField};
use std::f64::consts::TAU;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// 运行参数
#[derive(Args)]
pub struct RunArgs {
    /// 配置文件路径（缺省时使用默认配置）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 覆盖配置中的模型 (qr, dynamic-cubic-root)
    #[arg(short, long)]
    pub model: Option<ModelKind>,

    /// 每个方向的单元数
    #[arg(long, default_value = "16")]
    pub cells: usize,

    /// 修正步数
    #[arg(short, long, default_value = "5")]
    pub steps: usize,

    /// 每步相位平移 [rad]
    #[arg(long, default_value = "0.1")]
    pub phase_step: f64,

    /// 速度幅值 [m/s]
    #[arg(long, default_value = "1.0")]
    pub amplitude: f64,
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== SgsLab 闭合运行 ===");

    let mut props = match &args.config {
        Some(path) => LesProperties::from_file(path)
            .with_context(|| format!("无法加载配置: {}", path.display()))?,
        None => LesProperties::default(),
    };
    if let Some(model) = args.model {
        props.model = model;
    }

    let mesh = Arc::new(
        BoxMeshBuilder::new(args.cells, args.cells, args.cells)
            .with_lengths(TAU, TAU, TAU)
            .periodic_all()
            .build()
            .context("构建网格失败")?,
    );
    info!("网格: {} 单元, {} 面", mesh.n_cells(), mesh.n_faces());

    let flow = IncompressibleFlow::new(props.transport.nu);
    let mut les = LesEddyViscosity::new(mesh.clone(), &props, flow).context("构建闭合失败")?;
    info!("模型: {}, ν = {:e} m²/s", les.name(), props.transport.nu);

    let start = Instant::now();
    for step in 0..args.steps {
        let phase = step as f64 * args.phase_step;
        let u = taylor_green(&mesh, args.amplitude, phase);

        les.correct(&u);
        let report = les.last_report();

        let k = les.k(&u);
        info!(
            "step {}: k {} | νsgs {} | νeff {}",
            step,
            summary(&k),
            summary(les.nu_sgs()),
            summary(les.nu_eff())
        );
        if let Some(dynamic) = les.model().as_dynamic() {
            info!(
                "  cD {} | cI {} | 回退 cD={} cI={}",
                summary(dynamic.cd()),
                summary(dynamic.ci()),
                report.cd_fallback,
                report.ci_fallback
            );
        }
        if report.clipped > 0 {
            warn!("  裁剪 {} 个单元", report.clipped);
        }
    }

    info!("=== 运行完成 ===");
    info!("计算时间: {:.3} s", start.elapsed().as_secs_f64());

    Ok(())
}

/// Taylor-Green 涡，沿 x 平移 `phase`
fn taylor_green(mesh: &FvMesh, amplitude: f64, phase: f64) -> VectorField {
    VectorField::from_fn(
        "U",
        Dimensions::VELOCITY,
        FieldLocation::Cell,
        mesh.n_cells(),
        |cell| {
            let c = mesh.cell_centre(cell);
            let x = c.x + phase;
            DVec3::new(
                x.sin() * c.y.cos() * c.z.cos(),
                -x.cos() * c.y.sin() * c.z.cos(),
                0.0,
            ) * amplitude
        },
    )
}

fn summary(field: &ScalarField) -> String {
    format!(
        "[{:.3e}, {:.3e}, {:.3e}]",
        field.min(),
        field.mean(),
        field.max()
    )
}
