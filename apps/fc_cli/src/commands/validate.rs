// apps/fc_cli/src/commands/validate.rs

//! 案例验证命令
//!
//! 对案例目录或单独的配置文件执行模式校验与条件绑定，
//! 输出人读报告或 `--json` 机读摘要。退出码非零时，
//! 首条错误即校验器返回的错误种类与出错记录的名称/索引。

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info, warn};

use fc_field::{CaseLoader, CaseReport, ConditionBinder, FieldLoader};
use fc_foundation::{ValidationError, ValidationReport};
use fc_mesh::{BlockMeshLoader, BoundaryLoader, MeshDescriptor, MeshValidator};

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 案例目录路径
    #[arg(short, long)]
    pub case: Option<PathBuf>,

    /// 网格描述文件路径
    #[arg(long)]
    pub block_mesh: Option<PathBuf>,

    /// 生成后边界文件路径
    #[arg(long)]
    pub boundary: Option<PathBuf>,

    /// 场文件路径（可重复）
    #[arg(long)]
    pub field: Vec<PathBuf>,

    /// 生成网格的全局面数（用于边界文件末尾校验）
    #[arg(long)]
    pub total_faces: Option<usize>,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,

    /// 输出 JSON 摘要
    #[arg(long)]
    pub json: bool,
}

/// JSON 摘要
#[derive(Serialize)]
struct JsonSummary {
    valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<CaseReport>,
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== FoamCase 案例验证 ===");

    let mut report = ValidationReport::new();
    let mut case_report = None;

    if let Some(case_dir) = &args.case {
        case_report = validate_case_dir(case_dir, args.total_faces, &mut report)?;
    } else if args.block_mesh.is_some() || args.boundary.is_some() {
        validate_parts(&args, &mut report)?;
    } else {
        println!("用法: fc_cli validate --case <案例目录>");
        println!("      fc_cli validate --block-mesh <文件> [--field <文件>...]");
        println!("      fc_cli validate --boundary <文件> [--total-faces N] [--field <文件>...]");
        return Ok(());
    }

    if args.json {
        let summary = JsonSummary {
            valid: if args.strict {
                !report.has_errors() && !report.has_warnings()
            } else {
                !report.has_errors()
            },
            errors: report.errors.iter().map(|e| e.to_string()).collect(),
            warnings: report.warnings.iter().map(|w| w.to_string()).collect(),
            report: case_report,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    print_validation_result(&report, args.strict)
}

/// 整体验证一个案例目录
fn validate_case_dir(
    case_dir: &PathBuf,
    total_faces: Option<usize>,
    report: &mut ValidationReport,
) -> Result<Option<CaseReport>> {
    println!("\n检查案例目录: {}", case_dir.display());

    let case = match CaseLoader::load_dir(case_dir) {
        Ok(case) => case,
        Err(e) => {
            report.add_error(ValidationError::Custom {
                message: e.to_string(),
            });
            return Ok(None);
        }
    };

    // 编写期网格描述的非致命诊断
    if let Some(block_mesh) = &case.block_mesh {
        report.merge(MeshValidator::scan_warnings(block_mesh));
    }

    match case.validate(total_faces) {
        Ok(case_report) => {
            println!(
                "  ✓ 网格模式有效: {} 个 patch, {} 个场绑定完成",
                case_report.descriptor.n_patches(),
                case_report.tables.len()
            );
            Ok(Some(case_report))
        }
        Err(e) => {
            report.add_error(ValidationError::Custom {
                message: e.to_string(),
            });
            Ok(None)
        }
    }
}

/// 分别验证单独指定的文件
fn validate_parts(args: &ValidateArgs, report: &mut ValidationReport) -> Result<()> {
    let mut descriptor: Option<MeshDescriptor> = None;

    if let Some(path) = &args.block_mesh {
        println!("\n检查网格描述文件: {}", path.display());
        match BlockMeshLoader::load(path) {
            Ok(dict) => {
                report.merge(MeshValidator::scan_warnings(&dict));
                match MeshValidator::validate_block_mesh(&dict) {
                    Ok(desc) => {
                        println!(
                            "  ✓ 网格描述有效: {} 顶点, {} 块, {} patch",
                            dict.n_vertices(),
                            dict.n_blocks(),
                            desc.n_patches()
                        );
                        descriptor = Some(desc);
                    }
                    Err(e) => report.add_error(ValidationError::Custom {
                        message: e.to_string(),
                    }),
                }
            }
            Err(e) => report.add_error(ValidationError::Custom {
                message: e.to_string(),
            }),
        }
    }

    if let Some(path) = &args.boundary {
        println!("\n检查边界文件: {}", path.display());
        match BoundaryLoader::load(path) {
            Ok(file) => {
                let total = args
                    .total_faces
                    .or_else(|| file.end_face())
                    .unwrap_or(0);
                match MeshValidator::validate_boundary(&file, total) {
                    Ok(desc) => {
                        println!(
                            "  ✓ 边界文件有效: {} patch, {} 边界面",
                            desc.n_patches(),
                            desc.total_boundary_faces()
                        );
                        // 扁平化形式与场文件的 patch 集一致，优先用于绑定
                        descriptor = Some(desc);
                    }
                    Err(e) => report.add_error(ValidationError::Custom {
                        message: e.to_string(),
                    }),
                }
            }
            Err(e) => report.add_error(ValidationError::Custom {
                message: e.to_string(),
            }),
        }
    }

    for path in &args.field {
        println!("\n检查场文件: {}", path.display());
        let field = match FieldLoader::load(path) {
            Ok(field) => field,
            Err(e) => {
                report.add_error(ValidationError::Custom {
                    message: e.to_string(),
                });
                continue;
            }
        };

        let desc = descriptor
            .as_ref()
            .context("绑定场文件需要先提供 --block-mesh 或 --boundary")?;
        match ConditionBinder::bind(desc, &field) {
            Ok(table) => {
                println!("  ✓ 场 '{}' 绑定 {} 个 patch", table.field(), table.len());
            }
            Err(e) => report.add_error(ValidationError::Custom {
                message: e.to_string(),
            }),
        }
    }

    Ok(())
}

fn print_validation_result(report: &ValidationReport, strict: bool) -> Result<()> {
    println!("\n=== 验证结果 ===");

    // 输出错误
    if report.has_errors() {
        println!("\n错误 ({}):", report.error_count());
        for err in &report.errors {
            error!("  ✗ {}", err);
            println!("  ✗ {}", err);
        }
    }

    // 输出警告
    if report.has_warnings() {
        println!("\n警告 ({}):", report.warning_count());
        for warning in &report.warnings {
            warn!("  ⚠ {}", warning);
            println!("  ⚠ {}", warning);
        }
    }

    // 最终判定
    let success = if strict {
        !report.has_errors() && !report.has_warnings()
    } else {
        !report.has_errors()
    };

    if success {
        println!("\n✓ 验证通过");
        Ok(())
    } else {
        println!("\n✗ 验证失败");
        bail!(
            "验证失败：发现 {} 个错误，{} 个警告",
            report.error_count(),
            report.warning_count()
        )
    }
}
