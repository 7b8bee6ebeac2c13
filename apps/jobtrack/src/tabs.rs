use std::fmt;

/// The two top-level sections. Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Tracker,
    Matcher,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Tracker, Tab::Matcher];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Tracker => "Application Tracker",
            Tab::Matcher => "Resume Matcher",
        }
    }

    pub fn section_id(self) -> &'static str {
        match self {
            Tab::Tracker => "tracker-view",
            Tab::Matcher => "matcher-view",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabButton {
    pub tab: Tab,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabBar {
    pub buttons: Vec<TabButton>,
    pub visible_section: &'static str,
}

pub fn render_tab_bar(active: Tab) -> TabBar {
    TabBar {
        buttons: Tab::ALL
            .iter()
            .map(|&tab| TabButton {
                tab,
                label: tab.label(),
                active: tab == active,
            })
            .collect(),
        visible_section: active.section_id(),
    }
}

impl fmt::Display for TabBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let buttons: Vec<String> = self
            .buttons
            .iter()
            .map(|b| {
                if b.active {
                    format!("[{}]", b.label)
                } else {
                    format!(" {} ", b.label)
                }
            })
            .collect();
        writeln!(f, "{}", buttons.join("  "))
    }
}
