// apps/fc_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 显示系统信息或案例配置文件的摘要。

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use fc_field::{CaseLoader, FieldLoader};
use fc_mesh::BlockMeshLoader;

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 案例目录路径
    #[arg(short, long)]
    pub case: Option<PathBuf>,

    /// 网格描述文件路径
    #[arg(long)]
    pub block_mesh: Option<PathBuf>,

    /// 场文件路径
    #[arg(long)]
    pub field: Option<PathBuf>,

    /// 显示系统信息
    #[arg(long)]
    pub system: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== FoamCase 信息 ===");

    let mut printed = false;

    if args.system {
        print_system_info();
        printed = true;
    }

    if let Some(path) = &args.case {
        print_case_info(path)?;
        printed = true;
    }

    if let Some(path) = &args.block_mesh {
        print_block_mesh_info(path)?;
        printed = true;
    }

    if let Some(path) = &args.field {
        print_field_info(path)?;
        printed = true;
    }

    if !printed {
        print_system_info();
    }

    Ok(())
}

fn print_system_info() {
    println!("=== 系统信息 ===");
    println!("FoamCase CLI 版本: {}", env!("CARGO_PKG_VERSION"));
    println!("目标平台: {}", std::env::consts::ARCH);
    println!("操作系统: {}", std::env::consts::OS);
}

fn print_case_info(path: &PathBuf) -> Result<()> {
    println!("=== 案例摘要: {} ===", path.display());

    let case = CaseLoader::load_dir(path)?;

    match &case.block_mesh {
        Some(dict) => println!(
            "网格描述: {} 顶点, {} 块, {} 单元, {} patch",
            dict.n_vertices(),
            dict.n_blocks(),
            dict.total_cells(),
            dict.boundary.len()
        ),
        None => println!("网格描述: 无"),
    }

    match &case.boundary {
        Some(file) => {
            println!(
                "边界文件: {} patch, {} 边界面",
                file.n_patches(),
                file.total_boundary_faces()
            );
            for patch in &file.patches {
                println!(
                    "  - {} ({}) nFaces={} startFace={}",
                    patch.name, patch.kind, patch.n_faces, patch.start_face
                );
            }
        }
        None => println!("边界文件: 无"),
    }

    println!("场文件: {} 个", case.fields.len());
    for field in &case.fields {
        println!(
            "  - {} {} ({} 个条件)",
            field.name,
            field.dimensions,
            field.boundary.len()
        );
    }

    Ok(())
}

fn print_block_mesh_info(path: &PathBuf) -> Result<()> {
    println!("=== 网格描述摘要: {} ===", path.display());

    let dict = BlockMeshLoader::load(path)?;
    println!("缩放因子: {}", dict.convert_to_meters);
    println!("顶点: {}", dict.n_vertices());
    println!("块: {} (共 {} 单元)", dict.n_blocks(), dict.total_cells());
    println!("曲边: {}", dict.edges.len());
    println!("patch: {}", dict.boundary.len());
    for patch in &dict.boundary {
        println!("  - {} ({}) {} 面", patch.name, patch.kind, patch.n_faces());
    }

    Ok(())
}

fn print_field_info(path: &PathBuf) -> Result<()> {
    println!("=== 场文件摘要: {} ===", path.display());

    let field = FieldLoader::load(path)?;
    println!("场名: {}", field.name);
    println!("量纲: {}", field.dimensions);
    println!("秩: {}", field.rank().name());
    println!("条件: {} 个", field.boundary.len());
    for (patch, spec) in &field.boundary {
        println!("  - {} -> {}", patch, spec.keyword());
    }

    Ok(())
}
