//! Chart colors per enumeration value.

use crate::dashboards::common::Dimension;
use crate::domain::a001_shipment::{
    normalize_terminal, Channel, Incoterm, ShipmentMode, ShipmentStatus,
};

/// Color of keys without an entry
pub const FALLBACK_COLOR: &str = "#9ca3af";

pub fn status_color(status: ShipmentStatus) -> &'static str {
    match status {
        ShipmentStatus::InTransit => "#3b82f6",
        ShipmentStatus::AtThePort => "#f59e0b",
        ShipmentStatus::DiRegistered => "#8b5cf6",
        ShipmentStatus::CargoCleared => "#10b981",
        ShipmentStatus::CargoDelivered => "#64748b",
    }
}

pub fn mode_color(mode: ShipmentMode) -> &'static str {
    match mode {
        ShipmentMode::Fcl => "#2563eb",
        ShipmentMode::Lcl => "#0ea5e9",
        ShipmentMode::FclLcl => "#6366f1",
        ShipmentMode::Air => "#f97316",
        ShipmentMode::Road => "#84cc16",
    }
}

pub fn incoterm_color(incoterm: Incoterm) -> &'static str {
    match incoterm {
        Incoterm::Exw => "#1e3a8a",
        Incoterm::Fca => "#1d4ed8",
        Incoterm::Fas => "#0369a1",
        Incoterm::Fob => "#0891b2",
        Incoterm::Cfr => "#0d9488",
        Incoterm::Cif => "#059669",
        Incoterm::Cpt => "#65a30d",
        Incoterm::Cip => "#ca8a04",
        Incoterm::Dap => "#ea580c",
        Incoterm::Dpu => "#dc2626",
        Incoterm::Ddp => "#be185d",
    }
}

pub fn channel_color(channel: Channel) -> &'static str {
    match channel {
        Channel::Green => "#16a34a",
        Channel::Yellow => "#eab308",
        Channel::Red => "#dc2626",
    }
}

/// Canonical terminal -> color
pub const TERMINAL_COLORS: &[(&str, &str)] = &[
    ("PORTONAVE", "#0f766e"),
    ("ITAPOA", "#1d4ed8"),
    ("APM TERMINALS", "#7c3aed"),
    ("TCP PARANAGUA", "#b45309"),
    ("MULTILOG", "#be123c"),
    ("SANTOS BRASIL", "#0369a1"),
    ("BTP", "#15803d"),
    ("DP WORLD", "#a21caf"),
    ("POLY TERMINAIS", "#c2410c"),
    ("LOCALFRIO", "#4d7c0f"),
];

/// Terminal color after normalization; unmapped terminals are drawn gray
pub fn terminal_color(terminal: &str) -> &'static str {
    let key = normalize_terminal(terminal);
    match TERMINAL_COLORS.iter().find(|(name, _)| *name == key) {
        Some((_, color)) => *color,
        None => {
            log::warn!("No color mapped for terminal '{}', using fallback", key);
            FALLBACK_COLOR
        }
    }
}

/// Color of a bucket key produced by `dimension`
pub fn color_for(dimension: Dimension, key: &str) -> &'static str {
    let color = match dimension {
        Dimension::Status => ShipmentStatus::parse(key).map(status_color),
        Dimension::Mode => ShipmentMode::parse(key).map(mode_color),
        Dimension::Incoterm => Incoterm::parse(key).map(incoterm_color),
        Dimension::Channel => Channel::parse(key).map(channel_color),
        Dimension::Terminal => return terminal_color(key),
    };
    color.unwrap_or_else(|| {
        log::warn!("No color mapped for {:?} key '{}', using fallback", dimension, key);
        FALLBACK_COLOR
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_shipment::known_terminals;

    #[test]
    fn test_every_known_terminal_has_a_color() {
        for terminal in known_terminals() {
            assert_ne!(terminal_color(terminal), FALLBACK_COLOR, "{terminal}");
        }
    }

    #[test]
    fn test_fallback_for_unmapped_keys() {
        assert_eq!(terminal_color("Armazém Desconhecido"), FALLBACK_COLOR);
        assert_eq!(color_for(Dimension::Status, "ON HOLD"), FALLBACK_COLOR);
    }

    #[test]
    fn test_color_for_dispatches() {
        assert_eq!(color_for(Dimension::Channel, "GREEN"), "#16a34a");
        assert_eq!(color_for(Dimension::Status, "CARGO READY"), status_color(ShipmentStatus::AtThePort));
        assert_eq!(color_for(Dimension::Terminal, "Terminal Itapoá"), "#1d4ed8");
    }
}
