/// Day offset on which a credential of the given age reaches the reset period.
///
/// Already expired credentials land on day 0. A credential changed today
/// (age 0) would reach the limit on day `reset_period`, one past the last
/// schedulable day, so the result is clamped to `reset_period - 1`.
pub fn target_day(age_days: i64, reset_period: u32) -> usize {
    let horizon = i64::from(reset_period);
    let remaining = horizon.saturating_sub(age_days).max(0);
    remaining.min(horizon - 1).max(0) as usize
}
