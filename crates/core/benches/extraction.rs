use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use docmirror_core::parse::parse_selector;
use docmirror_core::{CrawlScope, DEFAULT_CONTENT_SELECTOR, Document, local_path, resolve};
use url::Url;

fn synthetic_page(links: usize) -> String {
    let mut html = String::from(r#"<html><body><nav>"#);
    for i in 0..links {
        html.push_str(&format!(r#"<a href="section-{i}/page-{i}#anchor">Page {i}</a>"#));
        html.push_str(&format!(r#"<a href="/blog/{i}">Blog {i}</a><a href="asset-{i}.png">Img</a>"#));
    }
    html.push_str(r#"</nav><div class="devsite-article-body">"#);
    for i in 0..links {
        html.push_str(&format!("<h2>Heading {i}</h2><p>Paragraph {i} with <code>inline</code> code.</p>"));
    }
    html.push_str("</div></body></html>");
    html
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for links in [10, 100, 1000] {
        let html = synthetic_page(links);
        group.bench_with_input(BenchmarkId::new("links", links), &html, |b, html| {
            b.iter(|| Document::parse(black_box(html)).links().len())
        });
    }

    group.finish();
}

fn bench_link_filter(c: &mut Criterion) {
    let html = synthetic_page(500);
    let doc = Document::parse(&html);
    let hrefs = doc.links();
    let page = Url::parse("https://example.com/docs/guide/").unwrap();
    let scope = CrawlScope::new("https://example.com/docs/", "example.com").unwrap();

    c.bench_function("resolve_and_filter", |b| {
        b.iter(|| {
            hrefs
                .iter()
                .filter_map(|href| resolve(&page, href))
                .filter(|url| scope.accepts(url))
                .count()
        })
    });
}

fn bench_block_text(c: &mut Criterion) {
    let html = synthetic_page(500);
    let doc = Document::parse(&html);
    let selector = parse_selector(DEFAULT_CONTENT_SELECTOR).unwrap();

    c.bench_function("block_text", |b| {
        b.iter(|| doc.find(black_box(&selector)).map(|node| node.block_text().len()))
    });
}

fn bench_local_path(c: &mut Criterion) {
    let url = Url::parse("https://example.com/docs/reference/spreadsheet/sheet").unwrap();

    c.bench_function("local_path", |b| b.iter(|| local_path(black_box(&url))));
}

criterion_group!(benches, bench_parse, bench_link_filter, bench_block_text, bench_local_path);
criterion_main!(benches);
