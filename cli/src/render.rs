use minepredict_core::{BoardView, CellView, GRID_SIDE, ProbabilitySnapshot, SeedInfo};
use std::fmt::Write;

fn glyph(cell: CellView) -> char {
    match cell {
        CellView::Hidden => '.',
        CellView::PredictedSafe => 'o',
        CellView::PredictedMine => '*',
        CellView::RevealedSafe => '+',
        CellView::RevealedMine => 'X',
    }
}

pub(crate) fn board(view: &BoardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "state: {}", view.state);
    for row in view.cells.rows() {
        let line: Vec<String> = row.iter().map(|&cell| glyph(cell).to_string()).collect();
        let _ = writeln!(out, "  {}", line.join(" "));
    }
    if let Some(index) = view.triggered_mine {
        let _ = writeln!(
            out,
            "hit mine at cell {index} (row {}, col {})",
            index / GRID_SIDE,
            index % GRID_SIDE
        );
    }
    out
}

pub(crate) fn snapshot(snapshot: Option<ProbabilitySnapshot>) -> String {
    match snapshot {
        Some(s) => format!(
            "mines left: {}  cells left: {}  win: {:.1}%  fair: {:.4}x  payout: {:.4}x",
            s.mines_remaining,
            s.cells_remaining,
            s.win_probability * 100.0,
            s.fair_multiplier,
            s.actual_multiplier
        ),
        None => "no odds: game not in play".to_owned(),
    }
}

pub(crate) fn seed_info(seed: &str, info: &SeedInfo) -> String {
    format!(
        "seed: {seed}\nformat: {}\nentropy: {:.2} bits/char ({:?})",
        info.format.name(),
        info.entropy,
        info.rating
    )
}
