//! Pure builders for the article browser's views.

use cb_core::format::{flatten_metadata, format_date, group_thousands, visible_paragraphs};
use cb_core::html::{Element, Node};
use cb_core::types::{ArticleDetail, ArticlePage, ArticleSummary};

use crate::dom::error_message;
use crate::router::{article_fragment, LIST_FRAGMENT};

pub const NOT_FOUND: &str = "기사를 찾을 수 없습니다.";

pub fn list_view(page: &ArticlePage) -> Vec<Node> {
    vec![info_line(page), article_table(&page.results), pagination(page.page, page.pages)]
}

fn info_line(page: &ArticlePage) -> Node {
    Element::new("div")
        .class("bespoke-info")
        .text(format!(
            "총 {}건 — {}/{} 페이지",
            group_thousands(page.total),
            page.page,
            page.pages
        ))
        .into()
}

fn article_table(articles: &[ArticleSummary]) -> Node {
    let head = Element::new("thead").child(
        Element::new("tr")
            .child(Element::new("th").text("소스"))
            .child(Element::new("th").text("제목"))
            .child(Element::new("th").text("날짜")),
    );
    let body = Element::new("tbody").children(articles.iter().map(article_row));

    Element::new("table")
        .class("bespoke-table")
        .child(head)
        .child(body)
        .into()
}

fn article_row(article: &ArticleSummary) -> Element {
    let source = article.badge_source();
    Element::new("tr")
        .attr("data-article-id", article.id.as_str())
        .attr("data-href", article_fragment(&article.id))
        .child(
            Element::new("td").child(
                Element::new("span")
                    .class("source-badge")
                    .class(source)
                    .text(source),
            ),
        )
        .child(Element::new("td").text(article.title()))
        .child(Element::new("td").text(format_date(article.date())))
}

/// Prev/Next controls. A button is disabled when it would leave `1..=pages`.
pub fn pagination(page: u32, pages: u32) -> Node {
    let prev = Element::new("button")
        .class("page-prev")
        .attr("data-page", page.saturating_sub(1).to_string())
        .flag("disabled", page <= 1)
        .text("← 이전");
    let next = Element::new("button")
        .class("page-next")
        .attr("data-page", page.saturating_add(1).to_string())
        .flag("disabled", page >= pages)
        .text("다음 →");

    Element::new("div")
        .class("bespoke-pagination")
        .child(prev)
        .child(Element::new("span").text(format!("{} / {}", page, pages)))
        .child(next)
        .into()
}

pub fn detail_view(article: &ArticleDetail) -> Vec<Node> {
    let back = Element::new("a")
        .class("bespoke-back")
        .attr("href", LIST_FRAGMENT)
        .text("← 목록으로");

    let body = if uses_parallel_layout(article) {
        parallel_view(article.original_paragraphs(), article.translation_paragraphs())
    } else {
        full_width_view(article.original_paragraphs())
    };

    vec![Node::from(back), metadata_card(article), body]
}

pub fn not_found() -> Vec<Node> {
    vec![error_message(NOT_FOUND)]
}

/// Side-by-side layout needs a translation flag and at least one visible
/// translated paragraph.
pub fn uses_parallel_layout(article: &ArticleDetail) -> bool {
    article.has_translation && visible_paragraphs(article.translation_paragraphs()).next().is_some()
}

fn metadata_card(article: &ArticleDetail) -> Node {
    let rows = flatten_metadata(&article.metadata).into_iter().map(|(path, value)| {
        Element::new("tr")
            .child(Element::new("th").text(path))
            .child(Element::new("td").text(value))
    });

    Element::new("details")
        .class("bespoke-metadata-card")
        .flag("open", true)
        .child(Element::new("summary").class("metadata-toggle").text("Metadata"))
        .child(Element::new("table").class("metadata-table").children(rows))
        .into()
}

fn parallel_view(original: &[String], translation: &[String]) -> Node {
    Element::new("div")
        .class("bespoke-parallel")
        .child(panel("원문", "original-panel", original, "original-paragraph"))
        .child(panel("번역", "translation-panel", translation, "translation-paragraph"))
        .into()
}

fn panel(title: &str, panel_class: &str, paragraphs: &[String], paragraph_class: &str) -> Element {
    Element::new("div")
        .class("parallel-panel")
        .class(panel_class)
        .child(Element::new("h3").text(title))
        .child(
            Element::new("div")
                .class("parallel-scroll")
                .children(paragraph_nodes(paragraphs, paragraph_class)),
        )
}

fn full_width_view(original: &[String]) -> Node {
    Element::new("div")
        .class("bespoke-fullwidth")
        .child(Element::new("h3").text("원문"))
        .children(paragraph_nodes(original, "original-paragraph"))
        .into()
}

fn paragraph_nodes<'a>(paragraphs: &'a [String], class: &'a str) -> impl Iterator<Item = Element> + 'a {
    visible_paragraphs(paragraphs).map(move |p| Element::new("div").class("paragraph").class(class).text(p))
}
