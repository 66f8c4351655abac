//! The built-in eleven-page deck on AI-assisted work.
//!
//! Pages 3 and 8 carry tables and page 5 a step stack; the rest are plain
//! templates. Templates live in one directory together with the generated
//! gradient and flowchart images they reference.

use std::path::{Path, PathBuf};

use super::manifest::{DeckSpec, PageSpec};
use crate::assets::AssetSpec;
use crate::common::StepDescriptor;
use crate::compose::{CellStyle, Payload, StepsPayload, TableCell, TablePayload, TableStyle};
use crate::ooxml::pptx::{SlideLayout, TextAlign, VerticalAnchor};

pub const DEMO_TITLE: &str = "AI协同：工作方式的革命";
pub const DEMO_AUTHOR: &str = "AI协同团队";
pub const DEMO_OUTPUT: &str = "AI协同工作新范式.pptx";

/// Template file names in page order.
pub const DEMO_TEMPLATES: [&str; 11] = [
    "slide01-cover.html",
    "slide02-change.html",
    "slide03-comparison.html",
    "slide04-idea1.html",
    "slide05-idea2.html",
    "slide06-idea3.html",
    "slide07-case.html",
    "slide08-roles.html",
    "slide09-company.html",
    "slide10-closing.html",
    "slide11-qa.html",
];

const ACCENT: &str = "667eea";
const PURPLE: &str = "764ba2";
const TEAL: &str = "00d4aa";
const PINK: &str = "f093fb";
const WHITE: &str = "FFFFFF";

/// The demo deck reading templates from `slides_dir` and writing `output`.
pub fn demo_deck(slides_dir: impl AsRef<Path>, output: impl Into<PathBuf>) -> DeckSpec {
    let dir = slides_dir.as_ref();
    let mut spec = DeckSpec::new(output);
    spec.title = Some(DEMO_TITLE.to_string());
    spec.author = Some(DEMO_AUTHOR.to_string());
    spec.layout = SlideLayout::Widescreen16x9;
    spec.assets = AssetSpec::builtin(dir);
    spec.pages = DEMO_TEMPLATES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let page = PageSpec::new(dir.join(name));
            match i {
                2 => page.with_payload(Payload::Table(comparison_table())),
                4 => page.with_payload(Payload::Steps(workflow_steps())),
                7 => page.with_payload(Payload::Table(roles_table())),
                _ => page,
            }
        })
        .collect();
    spec
}

fn cell(text: &str, fill: Option<&str>, color: Option<&str>, font_size: Option<f64>) -> TableCell {
    TableCell::styled(
        text,
        CellStyle {
            fill: fill.map(str::to_string),
            color: color.map(str::to_string),
            bold: Some(true),
            font_size,
        },
    )
}

fn plain_row(cells: [&str; 3]) -> Vec<TableCell> {
    cells.into_iter().map(TableCell::from).collect()
}

/// Traditional versus assisted workflow, page 3.
pub fn comparison_table() -> TablePayload {
    let rows = vec![
        vec![
            cell("传统开发流程", Some(ACCENT), Some(WHITE), Some(14.0)),
            cell("AI协同流程", Some(PURPLE), Some(WHITE), Some(14.0)),
            cell("效率提升", Some(TEAL), Some(WHITE), Some(14.0)),
        ],
        plain_row(["📝 写需求文档（1天）", "💬 对话描述需求（10分钟）", "12x"]),
        plain_row(["💻 编写代码（2天）", "🤖 AI生成代码（5分钟）", "100x"]),
        plain_row(["🐛 调试修复（1天）", "👀 验证+AI修复（30分钟）", "16x"]),
        plain_row(["📄 编写文档（半天）", "📋 AI生成文档（5分钟）", "50x"]),
        vec![
            cell("总计：4.5天", None, None, Some(12.0)),
            cell("总计：1小时", None, Some(TEAL), Some(12.0)),
            cell("40倍+", None, Some(PINK), Some(14.0)),
        ],
    ];
    let style = TableStyle {
        header: Some(CellStyle {
            color: Some(WHITE.to_string()),
            bold: Some(true),
            ..CellStyle::default()
        }),
        ..TableStyle::default()
    };
    TablePayload::new(rows, vec![0.35, 0.4, 0.25]).with_style(style)
}

/// Describe, generate, verify loop, page 5.
pub fn workflow_steps() -> StepsPayload {
    let arrow = || StepDescriptor::separator("↓", PINK);
    StepsPayload::new(vec![
        StepDescriptor::step("想清楚要什么", ACCENT),
        arrow(),
        StepDescriptor::step("描述给AI", ACCENT),
        arrow(),
        StepDescriptor::step("AI快速实现", ACCENT),
        arrow(),
        StepDescriptor::step("验证效果", ACCENT),
        arrow(),
        StepDescriptor::step("满意？否则返回修改", TEAL),
        arrow(),
        StepDescriptor::step("✅ 完成", PURPLE),
    ])
}

/// Gains per role, page 8.
pub fn roles_table() -> TablePayload {
    let rows = vec![
        plain_row(["岗位", "AI协助的工作", "效率提升"]),
        plain_row(["📊 产品经理", "写PRD、画原型、生成测试用例", "3-5倍"]),
        plain_row(["🎨 设计师", "生成初版设计、批量变体、设计系统", "5-10倍"]),
        plain_row(["📢 运营/市场", "写文案、活动方案、数据分析报告", "5-8倍"]),
        plain_row(["💼 销售", "客户提案、竞品分析、话术优化", "3-5倍"]),
        plain_row(["💻 技术", "写代码、写文档、代码审查", "10-50倍"]),
    ];
    let style = TableStyle {
        align: TextAlign::Left,
        valign: VerticalAnchor::Middle,
        header: Some(CellStyle {
            fill: Some(ACCENT.to_string()),
            color: Some(WHITE.to_string()),
            bold: Some(true),
            font_size: None,
        }),
        ..TableStyle::default()
    };
    TablePayload::new(rows, vec![0.2, 0.55, 0.25]).with_style(style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Rasterizer;
    use crate::deck::Deck;
    use resvg::usvg::fontdb;

    #[test]
    fn test_demo_pages_in_order() {
        let spec = demo_deck("slides", "out.pptx");
        assert_eq!(spec.pages.len(), 11);
        assert_eq!(spec.pages[0].template, Path::new("slides/slide01-cover.html"));
        assert_eq!(spec.pages[10].template, Path::new("slides/slide11-qa.html"));
        assert_eq!(spec.assets.len(), 3);
        assert!(spec.validate().is_ok());

        let payloads: Vec<usize> = spec
            .pages
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.payload.is_none())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(payloads, vec![2, 4, 7]);
    }

    #[test]
    fn test_comparison_table_styles() {
        let table = comparison_table();
        assert!(table.validate().is_ok());
        let header = table.style.resolve(0, &table.rows[0][1]);
        assert_eq!(header.fill.as_deref(), Some("764BA2"));
        assert_eq!(header.text.size, Some(14.0));
        assert_eq!(header.text.bold, Some(true));

        let body = table.style.resolve(2, &table.rows[2][0]);
        assert_eq!(body.fill.as_deref(), Some("2D2D44"));
        assert_eq!(body.text.size, Some(11.0));

        let total = table.style.resolve(5, &table.rows[5][2]);
        assert_eq!(total.text.color.as_deref(), Some("F093FB"));
    }

    #[test]
    fn test_roles_table_header_fill() {
        let table = roles_table();
        assert!(table.validate().is_ok());
        for cell in &table.rows[0] {
            let format = table.style.resolve(0, cell);
            assert_eq!(format.fill.as_deref(), Some("667EEA"));
            assert_eq!(format.align, TextAlign::Left);
        }
    }

    #[test]
    fn test_workflow_has_six_boxes() {
        let steps = workflow_steps().steps;
        assert_eq!(steps.len(), 11);
        assert_eq!(steps.iter().filter(|s| s.is_separator).count(), 5);
        assert_eq!(steps.last().map(|s| s.hex_color()), Some("764BA2".to_string()));
    }

    #[tokio::test]
    async fn test_build_bundled_demo() {
        let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("slides");
        let dir = tempfile::tempdir().unwrap();
        for name in DEMO_TEMPLATES {
            std::fs::copy(source.join(name), dir.path().join(name)).unwrap();
        }

        let spec = demo_deck(dir.path(), dir.path().join(DEMO_OUTPUT));
        let report = Deck::new()
            .with_rasterizer(Rasterizer::with_fonts(fontdb::Database::new()))
            .build(&spec)
            .await
            .unwrap();

        assert_eq!(report.slides, 11);
        assert_eq!(report.assets.len(), 3);
        assert!(dir.path().join("flowchart.png").exists());
        assert_eq!(report.pages[2].shapes_added, 1);
        assert_eq!(report.pages[4].shapes_added, 17);
        assert!(report.pages[4].overflow.is_none());
        assert_eq!(report.pages[7].shapes_added, 1);
        assert!(spec.output.exists());
    }
}
