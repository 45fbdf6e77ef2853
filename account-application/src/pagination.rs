//! 分页归一化
//!
//! - `take` 超过 [`MAX_TAKE`] 时截断为 [`MAX_TAKE`]；
//! - `skip` 与 `take` 同时为 0（调用方未分页）时 `take` 取 [`MAX_TAKE`]；
//! - `skip` 原样透传。`skip > 0 && take == 0` 不做修正，结果为空页。
//!

/// 单页最大条数，也是未分页时的默认条数
pub const MAX_TAKE: u64 = 100;

/// 返回归一化后的 `take`
///
/// ```
/// use account_application::pagination::normalize_take;
///
/// assert_eq!(normalize_take(0, 0), 100);
/// assert_eq!(normalize_take(3, 500), 100);
/// assert_eq!(normalize_take(3, 20), 20);
/// assert_eq!(normalize_take(5, 0), 0);
/// ```
pub const fn normalize_take(skip: u64, take: u64) -> u64 {
    if take > MAX_TAKE || (skip == 0 && take == 0) {
        MAX_TAKE
    } else {
        take
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        assert_eq!(normalize_take(0, 100), 100);
        assert_eq!(normalize_take(0, 101), 100);
        assert_eq!(normalize_take(0, u64::MAX), 100);
        assert_eq!(normalize_take(0, 1), 1);
        assert_eq!(normalize_take(u64::MAX, 0), 0);
    }
}
