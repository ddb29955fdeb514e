use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::types::{Node, RosterItem};

static CONTENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article, .page-content, .event-page, main").unwrap());

static NAME: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".name, .pkmn-name, .boss-name").unwrap());

static IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

static SHINY: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".shiny-icon, .shiny, img[src*='shiny']").unwrap());

/// Elements whose internals the engine never looks at.
const OPAQUE: &[&str] = &["table", "figure", "img", "picture", "video", "iframe", "svg"];

/// Flatten an event page into the ordered node sequence the engine consumes.
/// The first recognized content container wins; a page without one falls back
/// to the document root.
pub fn content_nodes(document: &Html) -> Vec<Node> {
    let root = document
        .select(&CONTENT)
        .next()
        .unwrap_or_else(|| document.root_element());
    let mut nodes = Vec::new();
    collect(root, &mut nodes);
    nodes
}

fn collect(el: ElementRef, out: &mut Vec<Node>) {
    for child in el.children() {
        let Some(child_el) = ElementRef::wrap(child) else {
            continue;
        };
        let name = child_el.value().name();
        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                out.push(heading_node(child_el, name));
            }
            "ul" | "ol" => out.push(roster_node(child_el)),
            "p" => out.push(Node::Paragraph(element_text(child_el))),
            "script" | "style" | "noscript" => {}
            _ if OPAQUE.contains(&name) => out.push(Node::Other),
            // Containers (div, section, span wrappers...) are transparent.
            _ => collect(child_el, out),
        }
    }
}

fn heading_node(el: ElementRef, name: &str) -> Node {
    let level = name.as_bytes()[1] - b'0';
    Node::Heading {
        level,
        id: el.value().id().map(String::from),
        text: element_text(el),
    }
}

fn roster_node(el: ElementRef) -> Node {
    // Direct children only; a nested list is its own roster candidate.
    let items = el
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "li")
        .map(|item| RosterItem {
            name: item
                .select(&NAME)
                .next()
                .map(element_text)
                .filter(|name| !name.is_empty()),
            image: item.select(&IMG).next().and_then(|img| {
                img.value()
                    .attr("src")
                    .or_else(|| img.value().attr("data-src"))
                    .map(String::from)
            }),
            shiny: item.select(&SHINY).next().is_some(),
        })
        .collect();
    Node::Roster(items)
}

fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_containers_and_types_nodes() {
        let html = Html::parse_document(
            r#"
            <article>
              <div class="intro"><p>Welcome,   Trainers!</p></div>
              <h2 id="raids">Raids</h2>
              <ul>
                <li><span class="name">Kyogre</span><img src="kyogre.png"></li>
                <li><img src="mystery.png"></li>
              </ul>
              <table><tr><td>ignored</td></tr></table>
            </article>
            "#,
        );
        let nodes = content_nodes(&html);
        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes[0], Node::Paragraph("Welcome, Trainers!".to_string()));
        assert_eq!(
            nodes[1],
            Node::Heading {
                level: 2,
                id: Some("raids".to_string()),
                text: "Raids".to_string(),
            }
        );
        let Node::Roster(items) = &nodes[2] else {
            panic!("expected roster node");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name.as_deref(), Some("Kyogre"));
        assert_eq!(items[0].image.as_deref(), Some("kyogre.png"));
        assert_eq!(items[1].name, None);
        assert_eq!(nodes[3], Node::Other);
    }

    #[test]
    fn shiny_marker_detected_on_items() {
        let html = Html::parse_document(
            r#"
            <main>
              <ul>
                <li><span class="name">Rayquaza</span><img src="rq.png"><span class="shiny-icon"></span></li>
                <li><span class="name">Regice</span><img src="regice.png"></li>
              </ul>
            </main>
            "#,
        );
        let nodes = content_nodes(&html);
        let Node::Roster(items) = &nodes[0] else {
            panic!("expected roster node");
        };
        assert!(items[0].shiny);
        assert!(!items[1].shiny);
    }
}
