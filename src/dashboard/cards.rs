// Static dashboard cards
// Placeholder panels; none of them is wired to live data

use serde::Serialize;

/// Backend indicator on the Systemstatus card. Fixed, not derived from the fetch.
pub const BACKEND_ONLINE: bool = true;

#[derive(Debug, Clone, Serialize)]
pub struct Card {
    pub icon: &'static str,
    pub title: &'static str,
    /// Monospace preview lines, rendered only when non-empty
    pub preview: &'static [&'static str],
    pub placeholder: &'static str,
}

pub const SYSTEM_STATUS: Card = Card {
    icon: "🖥️",
    title: "Systemstatus",
    preview: &[],
    placeholder: "Weitere Services werden hier überwacht.",
};

pub const MONITORING: Card = Card {
    icon: "📈",
    title: "Monitoring & Analytics",
    preview: &[],
    placeholder: "Platzhalter: Trenddiagramm, Traffic, KPIs etc.",
};

pub const LOG_PREVIEW: Card = Card {
    icon: "📋",
    title: "Logs-Vorschau",
    preview: &[
        "2024-06-10 10:12:21 - Server gestartet",
        "2024-06-10 10:13:48 - Auth erfolgreich",
        "...",
    ],
    placeholder: "Mehr Details & Filter folgen...",
};

pub const SETTINGS: Card = Card {
    icon: "⚙️",
    title: "Einstellungen",
    preview: &[],
    placeholder: "Platzhalter für Nutzer- & Systemoptionen.",
};

/// Cards rendered after the status card, in display order
pub const fn static_cards() -> [Card; 3] {
    [MONITORING, LOG_PREVIEW, SETTINGS]
}
