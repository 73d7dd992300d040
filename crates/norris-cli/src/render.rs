//! Plain-text rendering for the shell and the one-shot commands.

use norris_core::{
  category::FactCategory,
  fact::NorrisFact,
  notice::{ErrorNotice, NoticeStyle},
};

/// How many category suggestions the search screen offers.
pub const SUGGESTION_COUNT: usize = 8;

pub fn fact_entry(index: usize, fact: &NorrisFact) -> String {
  let label = fact.category_label();
  if fact.is_long() {
    format!("{:>3}. {}\n     [{label}]", index + 1, fact.text)
  } else {
    format!("{:>3}. [{label}] {}", index + 1, fact.text)
  }
}

pub fn fact_list(facts: &[NorrisFact]) -> String {
  if facts.is_empty() {
    return "No facts yet. Type /search to look some up.".to_owned();
  }
  facts
    .iter()
    .enumerate()
    .map(|(i, f)| fact_entry(i, f))
    .collect::<Vec<_>>()
    .join("\n")
}

pub fn facts_header(term: &str) -> String {
  if term.is_empty() {
    "── Discover ──".to_owned()
  } else {
    format!("── Facts for \"{term}\" ──")
  }
}

pub fn notice(notice: &ErrorNotice) -> String {
  let mut out = match notice.style {
    NoticeStyle::FullScreen => format!("[{}] {}", notice.icon, notice.message),
    NoticeStyle::Toast => format!("! {}", notice.message),
  };
  if notice.retry_enabled {
    out.push_str("\n    type `retry` to try again");
  }
  out
}

pub fn search_screen(categories: &[FactCategory], past_terms: &[String]) -> String {
  let mut out = String::from("── Search ──\nType a term and press enter, or `back` to cancel.");

  if !categories.is_empty() {
    let suggestions: Vec<&str> = categories
      .iter()
      .take(SUGGESTION_COUNT)
      .map(|c| c.title.as_str())
      .collect();
    out.push_str("\n\nSuggestions: ");
    out.push_str(&suggestions.join(", "));
  }

  if !past_terms.is_empty() {
    out.push_str("\n\nPast searches:\n");
    out.push_str(&history(past_terms));
  }
  out
}

pub fn history(terms: &[String]) -> String {
  if terms.is_empty() {
    return "No past searches.".to_owned();
  }
  terms
    .iter()
    .map(|t| format!("  {t}"))
    .collect::<Vec<_>>()
    .join("\n")
}

pub fn share(fact: &NorrisFact) -> String {
  format!(
    "── Share ──\n[{}] {}\n\n{}\n\n`back` to return.",
    fact.category_label(),
    fact.text,
    fact.url
  )
}

pub fn help() -> &'static str {
  "Commands:
  /search     open the search screen
  <term>      on the search screen, search for <term>
  clear       back to the discover view
  share N     share fact number N
  back        leave the current screen
  retry       retry a failed category sync
  history     list past searches
  quit        leave the shell"
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use norris_core::{
    error::{FactsError, NetworkError},
    notice::OFFLINE_MESSAGE,
  };

  use super::*;

  fn fact(text: &str, categories: &[&str]) -> NorrisFact {
    NorrisFact {
      id:         "id".into(),
      text:       text.into(),
      icon_url:   String::new(),
      url:        "https://api.chucknorris.io/jokes/id".into(),
      created_at: Utc::now(),
      updated_at: Utc::now(),
      categories: categories.iter().map(|c| FactCategory::new(*c)).collect(),
    }
  }

  #[test]
  fn short_fact_is_one_line() {
    let line = fact_entry(0, &fact("Chuck Norris can divide by zero.", &["science"]));
    assert_eq!(line, "  1. [SCIENCE] Chuck Norris can divide by zero.");
  }

  #[test]
  fn long_fact_puts_label_below() {
    let text = "x".repeat(81);
    let entry = fact_entry(9, &fact(&text, &[]));
    assert_eq!(entry, format!(" 10. {text}\n     [UNCATEGORIZED]"));
  }

  #[test]
  fn empty_list_prompts_a_search() {
    assert!(fact_list(&[]).contains("/search"));
  }

  #[test]
  fn offline_notice_has_no_retry_hint() {
    let err = FactsError::SyncCategoriesFailed(NetworkError::NoInternetConnection);
    let text = notice(&ErrorNotice::for_error(&err, true));
    assert_eq!(text, format!("[wifi_error] {OFFLINE_MESSAGE}"));
  }

  #[test]
  fn sync_failure_notice_offers_retry() {
    let err = FactsError::SyncCategoriesFailed(NetworkError::StatusCode(500));
    assert!(notice(&ErrorNotice::for_error(&err, true)).ends_with("type `retry` to try again"));
  }

  #[test]
  fn search_screen_caps_suggestions() {
    let categories: Vec<FactCategory> =
      (0..12).map(|i| FactCategory::new(format!("c{i}"))).collect();
    let screen = search_screen(&categories, &["sport".into()]);
    assert!(screen.contains("c7"));
    assert!(!screen.contains("c8"));
    assert!(screen.ends_with("  sport"));
  }
}
