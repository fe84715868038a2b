use std::path::Path;

use plotters::prelude::*;
use serde::Deserialize;
use tracing::debug;

use crate::error::{MicroProverError, Result};

// 离线绘图：读取运行日志，按目标值聚合尝试次数，渲染分组柱状图

// 簇内单根柱子的宽度（以簇间距为1）
const BAR_WIDTH: f64 = 0.2;

// 簇内柱子的循环配色
const SERIES_COLORS: [RGBColor; 4] = [BLUE, GREEN, RED, YELLOW];

// 日志中的一行记录，按表头字段名反序列化
#[derive(Debug, Clone, Deserialize)]
pub struct LogRow {
    #[serde(rename = "Run")]
    pub run: u64,
    #[serde(rename = "Target")]
    pub target: String,
    #[serde(rename = "Solution_Hash8")]
    pub hash8: String,
    #[serde(rename = "Block")]
    pub block: u32,
    #[serde(rename = "Solution_Nonce")]
    pub nonce: u32,
    #[serde(rename = "Attempts")]
    pub attempts: u64,
}

pub fn load_log<P: AsRef<Path>>(path: P) -> Result<Vec<LogRow>> {
    let mut reader = csv::Reader::from_path(path.as_ref()).map_err(|e| {
        MicroProverError::Csv(format!("无法打开日志 {}: {}", path.as_ref().display(), e))
    })?;

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        let row: LogRow = row?;
        rows.push(row);
    }
    debug!("读取 {} 条运行记录", rows.len());
    Ok(rows)
}

// 按目标值聚合尝试次数，保持首次出现的顺序
// 例如目标 01000000 的若干轮可能分别尝试了 5、4、8 次
pub fn group_attempts(rows: &[LogRow]) -> Vec<(String, Vec<u64>)> {
    let mut groups: Vec<(String, Vec<u64>)> = Vec::new();
    for row in rows {
        match groups.iter_mut().find(|(target, _)| *target == row.target) {
            Some((_, attempts)) => attempts.push(row.attempts),
            None => groups.push((row.target.clone(), vec![row.attempts])),
        }
    }
    groups
}

// 渲染分组柱状图并写入PNG
// 每个目标值一簇，簇内柱子水平偏移；x轴标签为目标的二进制串（旋转90度）
pub fn render_bar_chart<P: AsRef<Path>>(groups: &[(String, Vec<u64>)], out_path: P) -> Result<()> {
    if groups.is_empty() {
        return Err(MicroProverError::Plot("日志中没有可绘制的数据".to_string()));
    }

    let max_attempts = groups
        .iter()
        .flat_map(|(_, attempts)| attempts.iter())
        .copied()
        .max()
        .unwrap_or(1);

    let root = BitMapBackend::new(out_path.as_ref(), (1024, 768)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Proof of Work Attempts", ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(120)
        .y_label_area_size(60)
        .build_cartesian_2d(
            -0.5f64..groups.len() as f64,
            0u64..max_attempts + max_attempts / 10 + 1,
        )
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .x_desc("Target (Binary)")
        .y_desc("Attempts")
        .draw()
        .map_err(plot_err)?;

    // 柱状图主体：同一目标的多轮尝试在簇内水平偏移
    for (i, (_, attempts)) in groups.iter().enumerate() {
        for (j, count) in attempts.iter().enumerate() {
            let x0 = i as f64 + j as f64 * BAR_WIDTH;
            let color = SERIES_COLORS[j % SERIES_COLORS.len()];
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x0, 0u64), (x0 + BAR_WIDTH, *count)],
                    color.filled(),
                )))
                .map_err(plot_err)?;
        }
    }

    // 目标值标签旋转90度放在各簇中心下方
    for (i, (target, attempts)) in groups.iter().enumerate() {
        let center =
            i as f64 + (attempts.len() as f64 / 2.0) * BAR_WIDTH - BAR_WIDTH / 2.0;
        let (x, y) = chart.backend_coord(&(center, 0));
        root.draw(&Text::new(
            target.clone(),
            (x, y + 10),
            ("sans-serif", 16)
                .into_font()
                .transform(FontTransform::Rotate90),
        ))
        .map_err(plot_err)?;
    }

    root.present().map_err(plot_err)?;
    Ok(())
}

fn plot_err<E: std::fmt::Display>(e: E) -> MicroProverError {
    MicroProverError::Plot(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{RunLogger, RunRecord};
    use tempfile::tempdir;

    fn row(target: &str, attempts: u64) -> LogRow {
        LogRow {
            run: 1,
            target: target.to_string(),
            hash8: "00000000".to_string(),
            block: 0,
            nonce: 0,
            attempts,
        }
    }

    #[test]
    fn test_grouping_by_target() {
        let rows = vec![
            row("10000000", 3),
            row("10000000", 5),
            row("01000000", 10),
        ];
        let groups = group_attempts(&rows);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], ("10000000".to_string(), vec![3, 5]));
        assert_eq!(groups[1], ("01000000".to_string(), vec![10]));
    }

    #[test]
    fn test_grouping_preserves_first_seen_order() {
        let rows = vec![
            row("00000010", 90),
            row("01000000", 2),
            row("00000010", 130),
        ];
        let groups = group_attempts(&rows);

        assert_eq!(groups[0].0, "00000010");
        assert_eq!(groups[0].1, vec![90, 130]);
        assert_eq!(groups[1].0, "01000000");
    }

    #[test]
    fn test_load_log_round_trips_with_logger() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("pow_log.csv");

        let mut logger = RunLogger::new(&path);
        logger.log_run(&RunRecord {
            run: 1,
            target: 128,
            hash8: 5,
            block: 42,
            nonce: 219,
            attempts: 3,
        });
        logger.log_run(&RunRecord {
            run: 2,
            target: 64,
            hash8: 17,
            block: 7,
            nonce: 91,
            attempts: 8,
        });

        let rows = load_log(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].run, 1);
        assert_eq!(rows[0].target, "10000000");
        assert_eq!(rows[0].hash8, "00000101");
        assert_eq!(rows[0].block, 42);
        assert_eq!(rows[1].target, "01000000");
        assert_eq!(rows[1].attempts, 8);
    }

    #[test]
    fn test_load_log_missing_file_errors() {
        assert!(load_log("does_not_exist.csv").is_err());
    }

    #[test]
    fn test_render_rejects_empty_log() {
        let temp_dir = tempdir().unwrap();
        let out = temp_dir.path().join("chart.png");
        assert!(render_bar_chart(&[], &out).is_err());
    }
}
