use mzscout::workflows::annotate::PeakAnnotation;

const RULE_WIDTH: usize = 78;

/// Formats a single annotation as a fixed-width table row.
pub fn format_hit(hit: &PeakAnnotation) -> String {
    format!(
        "{:<24} {:>10.4}  {:+}  {:<10} {:>10.4}  {:+7.2} ppm",
        hit.formula, hit.mz, hit.charge, hit.adduct, hit.neutral_mass, hit.hit.ppm_error
    )
}

fn header_row() -> String {
    format!(
        "{:<24} {:>10}  {:>2}  {:<10} {:>10}  {:>10}",
        "Formula", "m/z", "z", "Adduct", "Neutral", "Error"
    )
}

pub fn print_header() {
    println!("{}", header_row());
    println!("{}", "-".repeat(RULE_WIDTH));
}

/// Prints the merged result table. With `show_level` (scan-all runs), each row
/// carries the coarseness tier that first discovered the formula.
pub fn print_results(hits: &[PeakAnnotation], show_level: bool) {
    if show_level {
        println!("{}  {:<8}", header_row(), "Level");
        println!("{}", "-".repeat(RULE_WIDTH + 10));
    } else {
        print_header();
    }
    for hit in hits {
        if show_level {
            println!("{}  {:<8}", format_hit(hit), hit.hit.level.label());
        } else {
            println!("{}", format_hit(hit));
        }
    }
}
