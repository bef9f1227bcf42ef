use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use markup_language_server::detect_language;

/// Generate buffer content for a detection scenario
fn generate_detection_content(paragraphs: usize, scenario: &str) -> String {
    let mut content = String::new();

    match scenario {
        "plain_html" => {
            content.push_str("<!DOCTYPE html>\n<html>\n<body>\n");
            for i in 0..paragraphs {
                content.push_str(&format!("<p id=\"p{}\">paragraph {}</p>\n", i, i));
            }
            content.push_str("</body>\n</html>\n");
        }
        "blogger_theme" => {
            content.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n");
            content.push_str("<html b:version='2' xmlns:b='http://www.google.com/2005/gml/b'>\n");
            content.push_str("<b:skin><![CDATA[ body { margin: 0; } ]]></b:skin>\n");
            for i in 0..paragraphs {
                content.push_str(&format!("<b:if cond='data:post.id == {}'><data:post.title/></b:if>\n", i));
            }
            content.push_str("</html>\n");
        }
        "near_miss" => {
            // Lots of text, markers appear only once near the end
            for i in 0..paragraphs {
                content.push_str(&format!("<div class=\"row{}\">plain content</div>\n", i));
            }
            content.push_str("<!-- expr: mentioned once in a comment -->\n");
        }
        _ => panic!("Unknown scenario: {}", scenario),
    }

    content
}

fn bench_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("language_detection");

    for scenario in ["plain_html", "blogger_theme", "near_miss"] {
        for size in [100, 1_000, 10_000] {
            let content = generate_detection_content(size, scenario);
            group.throughput(Throughput::Bytes(content.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(scenario, size),
                &content,
                |b, content| b.iter(|| detect_language(black_box(content))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_detection);
criterion_main!(benches);
