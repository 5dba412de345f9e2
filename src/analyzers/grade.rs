//! Letter grades for trend quality.

/// Grades a coefficient of determination. A country whose metric moves in
/// lockstep with time earns an A+; one whose yearly values are basically
/// noise around a constant gets an F.
///
/// Bands: A+ at 0.99, A at 0.95, B at 0.85, C at 0.70, D at 0.50.
pub fn grade(r_squared: f64) -> &'static str {
    const BANDS: [(f64, &str); 5] = [
        (0.99, "A+"),
        (0.95, "A"),
        (0.85, "B"),
        (0.70, "C"),
        (0.50, "D"),
    ];

    BANDS
        .iter()
        .find(|(cutoff, _)| r_squared >= *cutoff)
        .map(|(_, g)| *g)
        .unwrap_or("F")
}
