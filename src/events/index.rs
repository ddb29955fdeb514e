use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

use super::images::normalize_image_url;

static EVENT_ITEM: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".event-item, .events-list__item").unwrap());

static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h2, .event-title").unwrap());

static CATEGORY: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".event-category, h5").unwrap());

static IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

/// One entry of the event index, as listed on the announcements page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSummary {
    #[serde(rename = "eventID")]
    pub event_id: String,
    pub name: String,
    pub link: String,
    pub image: String,
    pub heading: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// Scrape the listing page into the event index. Entries without a link are
/// skipped; duplicate ids keep their first occurrence.
pub fn parse_event_index(document: &Html, base: &Url) -> Vec<EventSummary> {
    let mut events: Vec<EventSummary> = Vec::new();

    for item in document.select(&EVENT_ITEM) {
        let Some(href) = item
            .select(&LINK)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            continue;
        };
        let Ok(link) = base.join(href) else {
            continue;
        };
        let Some(event_id) = event_id_from_link(&link) else {
            continue;
        };
        if events.iter().any(|e| e.event_id == event_id) {
            continue;
        }

        let name = item
            .select(&TITLE)
            .next()
            .map(element_text)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| event_id.clone());
        let heading = item
            .select(&CATEGORY)
            .next()
            .map(element_text)
            .unwrap_or_default();
        let image = item
            .select(&IMG)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(normalize_image_url)
            .unwrap_or_default();

        events.push(EventSummary {
            event_id,
            name,
            link: link.to_string(),
            image,
            heading,
            start: item.value().attr("data-start").map(String::from),
            end: item.value().attr("data-end").map(String::from),
        });
    }

    log::info!("Parsed {} events from listing", events.len());
    events
}

/// The last non-empty path segment names the event.
fn event_id_from_link(link: &Url) -> Option<String> {
    link.path_segments()?
        .filter(|segment| !segment.is_empty())
        .next_back()
        .map(String::from)
}

fn element_text(el: scraper::ElementRef) -> String {
    el.text().collect::<String>().split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> Html {
        Html::parse_document(
            r#"
            <div class="events-list">
              <div class="event-item" data-start="2026-03-14T10:00:00" data-end="2026-03-15T20:00:00">
                <a href="/events/primal-weekend/">
                  <h2>Primal Weekend</h2>
                  <img src="//cdn.example.com/events/primal.png?v=3">
                </a>
                <p class="event-category">Raid Weekend</p>
              </div>
              <div class="event-item">
                <a href="/events/primal-weekend/"><h2>Duplicate</h2></a>
              </div>
              <div class="event-item"><h2>No link here</h2></div>
            </div>
            "#,
        )
    }

    #[test]
    fn listing_parses_into_index() {
        let base = Url::parse("https://announcements.example").unwrap();
        let events = parse_event_index(&listing(), &base);

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.event_id, "primal-weekend");
        assert_eq!(event.name, "Primal Weekend");
        assert_eq!(
            event.link,
            "https://announcements.example/events/primal-weekend/"
        );
        assert_eq!(event.image, "https://cdn.example.com/events/primal.png");
        assert_eq!(event.heading, "Raid Weekend");
        assert_eq!(event.start.as_deref(), Some("2026-03-14T10:00:00"));
        assert_eq!(event.end.as_deref(), Some("2026-03-15T20:00:00"));
    }

    #[test]
    fn absent_start_is_omitted_from_json() {
        let base = Url::parse("https://announcements.example").unwrap();
        let events = parse_event_index(&listing(), &base);
        let json = serde_json::to_value(&events[0]).unwrap();
        assert!(json.get("start").is_some());

        let bare = EventSummary {
            event_id: "x".to_string(),
            name: "X".to_string(),
            link: "https://announcements.example/events/x/".to_string(),
            image: String::new(),
            heading: String::new(),
            start: None,
            end: None,
        };
        let json = serde_json::to_value(&bare).unwrap();
        assert!(json.get("start").is_none());
    }
}
