/*
 * @Author       : 老董
 * @Date         : 2026-08-30
 * @Description  : 渲染适配：Graphviz 检测、DOT 渲染与图像文件输出
 */

use super::builder::model_to_dot;
use super::types::PlotOptions;
use crate::error::{ImageFormat, PlotError, PlotOutput};
use crate::model::Model;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// 检测 Graphviz 是否可用
pub fn is_graphviz_available() -> bool {
    Command::new("dot")
        .arg("-V")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Graphviz 缺失时的快速失败（带安装提示）
fn check_graphviz() -> Result<(), PlotError> {
    if is_graphviz_available() {
        return Ok(());
    }
    Err(PlotError::GraphvizMissing(
        "Graphviz 未安装或不在 PATH 中。\n\
         安装方式:\n\
         - Windows: winget install graphviz 或 choco install graphviz\n\
         - macOS: brew install graphviz\n\
         - Linux: sudo apt install graphviz\n\
         安装后可用在线预览: https://dreampuf.github.io/GraphvizOnline/"
            .to_string(),
    ))
}

/// 调用 Graphviz 渲染 DOT 文本，返回图像字节
///
/// DOT 文本经标准输入送入 `dot` 进程，图像字节从标准输出捕获，
/// 失败时不会留下任何部分写入的文件。
pub fn render_dot(dot_source: &str, format: ImageFormat) -> Result<Vec<u8>, PlotError> {
    check_graphviz()?;
    render_dot_unchecked(dot_source, format)
}

fn render_dot_unchecked(dot_source: &str, format: ImageFormat) -> Result<Vec<u8>, PlotError> {
    let mut child = Command::new("dot")
        .arg(format!("-T{}", format.extension()))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| PlotError::IoError(format!("执行 Graphviz 命令失败: {e}")))?;

    {
        let Some(mut stdin) = child.stdin.take() else {
            return Err(PlotError::IoError(
                "无法获取 Graphviz 进程的标准输入".to_string(),
            ));
        };
        stdin
            .write_all(dot_source.as_bytes())
            .map_err(|e| PlotError::IoError(format!("向 Graphviz 写入 DOT 失败: {e}")))?;
        // stdin 在块尾关闭，dot 才会开始输出
    }

    let output = child
        .wait_with_output()
        .map_err(|e| PlotError::IoError(format!("等待 Graphviz 进程失败: {e}")))?;

    if output.status.success() {
        Ok(output.stdout)
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(PlotError::RenderFailed(stderr.trim().to_string()))
    }
}

/// 由输出路径解析实际写入路径与图像格式
///
/// 有后缀时按后缀选格式（未知后缀报错）；无后缀时默认 PNG 并补 `.png`。
pub(crate) fn resolve_output(path: &Path) -> Result<(PathBuf, ImageFormat), PlotError> {
    match path.extension() {
        None => Ok((path.with_extension("png"), ImageFormat::Png)),
        Some(ext) => {
            let ext_str = ext.to_string_lossy();
            ImageFormat::from_extension(&ext_str)
                .map(|format| (path.to_path_buf(), format))
                .ok_or_else(|| {
                    PlotError::InvalidOperation(format!(
                        "未知后缀 '.{ext_str}'。支持的图像格式: png, svg, pdf, jpg"
                    ))
                })
        }
    }
}

/// 将模型渲染为图像文件
///
/// 输出路径的后缀选择图像格式，无后缀时默认 PNG。Graphviz 缺失时
/// 在构图之前即报错；渲染失败时不写文件。成功时返回写入路径、
/// 原始字节，以及栅格格式下 best-effort 解码出的内存图像句柄。
pub fn plot_model<P: AsRef<Path>>(
    model: &Model,
    to_file: P,
    options: &PlotOptions,
) -> Result<PlotOutput, PlotError> {
    let (path, format) = resolve_output(to_file.as_ref())?;

    // Graphviz 检查先于构图
    check_graphviz()?;

    let graph = model_to_dot(model, options)?;
    let bytes = render_dot_unchecked(&graph.to_dot(), format)?;

    std::fs::write(&path, &bytes)
        .map_err(|e| PlotError::IoError(format!("写入图像文件失败: {e}")))?;

    // 栅格格式尽力解码为内存图像句柄；解码失败不算错误
    let image = if format.is_raster() {
        image::load_from_memory(&bytes).ok()
    } else {
        None
    };

    Ok(PlotOutput {
        path,
        format,
        bytes,
        image,
    })
}
