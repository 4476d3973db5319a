//! Keyword routing for the offline tier.
//!
//! Rules are checked in order and the first match wins. Text the rules do
//! not claim gets the capability-disclosure reply.

/// What a matched rule dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddReturn,
    ListAll,
    ExportReport,
}

/// A named cue predicate bound to an action.
pub struct KeywordRule {
    pub name: &'static str,
    pub action: Action,
    trigger: fn(&str) -> bool,
}

impl KeywordRule {
    pub fn matches(&self, text: &str) -> bool {
        (self.trigger)(text)
    }
}

const ADD_VERBS: &[&str] = &["新增", "加入"];
const ADD_NOUNS: &[&str] = &["退貨", "退貨紀錄", "退貨資料"];
const LIST_VERBS: &[&str] = &["列出", "顯示", "查看"];
const LIST_NOUNS: &[&str] = &["所有", "全部", "資料", "清單"];
const EXPORT_VERBS: &[&str] = &["匯出", "輸出"];

fn contains_any(text: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| text.contains(cue))
}

fn add_cue(text: &str) -> bool {
    contains_any(text, ADD_VERBS) && contains_any(text, ADD_NOUNS)
}

fn list_cue(text: &str) -> bool {
    contains_any(text, LIST_VERBS) && contains_any(text, LIST_NOUNS)
}

fn export_cue(text: &str) -> bool {
    contains_any(text, EXPORT_VERBS)
        && (text.to_lowercase().contains("excel") || text.contains("報表"))
}

fn key_value_cue(text: &str) -> bool {
    crate::slots::has_explicit_fields(text)
}

static RULES: [KeywordRule; 4] = [
    KeywordRule {
        name: "add",
        action: Action::AddReturn,
        trigger: add_cue,
    },
    KeywordRule {
        name: "list",
        action: Action::ListAll,
        trigger: list_cue,
    },
    KeywordRule {
        name: "export",
        action: Action::ExportReport,
        trigger: export_cue,
    },
    KeywordRule {
        name: "key_value",
        action: Action::AddReturn,
        trigger: key_value_cue,
    },
];

/// First rule whose cues match `text`.
pub fn route(text: &str) -> Option<&'static KeywordRule> {
    RULES.iter().find(|rule| rule.matches(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(text: &str) -> Option<Action> {
        route(text).map(|r| r.action)
    }

    #[test]
    fn add_requires_verb_and_noun() {
        assert_eq!(action("我要新增一筆退貨"), Some(Action::AddReturn));
        assert_eq!(action("加入退貨資料"), Some(Action::AddReturn));
        assert_eq!(action("新增一筆訂單"), None);
        assert_eq!(action("退貨很麻煩"), None);
    }

    #[test]
    fn list_requires_verb_and_noun() {
        assert_eq!(action("列出所有資料"), Some(Action::ListAll));
        assert_eq!(action("查看清單"), Some(Action::ListAll));
        assert_eq!(action("顯示全部"), Some(Action::ListAll));
        assert_eq!(action("列出"), None);
    }

    #[test]
    fn export_is_case_insensitive_on_excel() {
        assert_eq!(action("將資料匯出成 excel"), Some(Action::ExportReport));
        assert_eq!(action("匯出 EXCEL"), Some(Action::ExportReport));
        assert_eq!(action("輸出報表"), Some(Action::ExportReport));
        assert_eq!(action("匯出 csv"), None);
    }

    #[test]
    fn add_wins_over_list() {
        let rule = route("新增退貨資料 然後列出所有資料").unwrap();
        assert_eq!(rule.name, "add");
    }

    #[test]
    fn list_wins_over_export() {
        // "資料" satisfies the list noun set, so list precedes export here.
        let rule = route("顯示資料 匯出 excel").unwrap();
        assert_eq!(rule.name, "list");
    }

    #[test]
    fn key_value_catches_bare_fields() {
        let rule = route("order_id=R12345, product=滑鼠, store_name=台中店, date=2025-08-19")
            .unwrap();
        assert_eq!(rule.name, "key_value");
        assert_eq!(rule.action, Action::AddReturn);
        assert_eq!(route("product=耳機").unwrap().name, "key_value");
    }

    #[test]
    fn unmatched_text() {
        assert!(route("今天天氣如何").is_none());
        assert!(route("").is_none());
    }

    #[test]
    fn rule_order() {
        let names: Vec<&str> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(names, ["add", "list", "export", "key_value"]);
    }
}
