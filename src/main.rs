use std::env;
use std::path::Path;

use reportgen_rust::{
    generate_html_report, generate_word_report, FigureSpec, Section, TableSpec, UserOptions,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: {} <output.docx|output.html> [figure.png]", args[0]);
        return;
    }

    let output_path = Path::new(&args[1]);

    let mut summary = Section::new()
        .title("概述")
        .paragraph("本报告由命令行演示程序生成。")
        .paragraph("备注：{{Note}}")
        .bullet("支持 Word 与 HTML 两种输出")
        .bullet("支持表格、图片与占位符替换")
        .table(
            TableSpec::new(vec![
                vec!["段落".to_string(), "2".to_string()],
                vec!["表格".to_string(), "1".to_string()],
            ])
            .header(vec!["内容".to_string(), "数量".to_string()]),
        );

    if let Some(figure_path) = args.get(2) {
        summary = summary.figure(FigureSpec::from_path(figure_path).caption("示例图片"));
    }

    let sections = vec![summary];

    let mut options = UserOptions {
        author: Some("演示程序".to_string()),
        footer_text: Some("内部资料".to_string()),
        ..UserOptions::default()
    };
    options.placeholders.insert(
        "Note".to_string(),
        reportgen_rust::PlaceholderPayload::Text("由占位符填充".to_string()),
    );

    let is_html = output_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("html"))
        .unwrap_or(false);

    let result = if is_html {
        generate_html_report(output_path, "演示报告", &sections, &options)
    } else {
        generate_word_report(output_path, "演示报告", &sections, &options)
    };

    match result {
        Ok(_) => {
            println!("生成完成！");
            println!("输出文件: {}", output_path.display());
        }
        Err(e) => {
            println!("生成失败: {}", e);
        }
    }
}
