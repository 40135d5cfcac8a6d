//! Linear phase-in of policy levers

/// Share of a lever's full magnitude in effect in `year`
///
/// Levers start phasing in at `start_year`. Without an implementation year,
/// or with one at or before the start, the lever is fully in effect
/// immediately. Otherwise the share ramps linearly from 0 at `start_year`
/// to 1 at `implementation_year` and stays at 1 afterwards.
pub fn phase_in_fraction(year: u32, start_year: u32, implementation_year: Option<u32>) -> f64 {
    debug_assert!(year >= start_year, "phase-in evaluated for {year} before start {start_year}");

    let target = match implementation_year {
        Some(target) if target > start_year => target,
        _ => return 1.0,
    };

    if year >= target {
        return 1.0;
    }

    let elapsed = year.saturating_sub(start_year) as f64;
    let span = (target - start_year) as f64;
    elapsed / span
}
