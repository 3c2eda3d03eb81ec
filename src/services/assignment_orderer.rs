//! 作业排序 - 业务能力层

use crate::models::Assignment;

/// 按截止时间升序稳定排序
///
/// 截止时间相同的作业保持输入顺序；没有截止时间的排在最前
pub fn order_by_due(mut assignments: Vec<Assignment>) -> Vec<Assignment> {
    assignments.sort_by_key(|a| a.due_at);
    assignments
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 20, 8, 0, 0).unwrap()
    }

    fn due_in(id: u64, hours: Option<i64>) -> Assignment {
        Assignment {
            id,
            course_id: 1,
            name: format!("a{}", id),
            html_url: String::new(),
            due_at: hours.map(|h| base() + Duration::hours(h)),
            unlock_at: None,
            submission: None,
        }
    }

    fn ids(list: &[Assignment]) -> Vec<u64> {
        list.iter().map(|a| a.id).collect()
    }

    #[test]
    fn output_is_non_decreasing() {
        let ordered = order_by_due(vec![
            due_in(1, Some(5)),
            due_in(2, Some(1)),
            due_in(3, Some(3)),
            due_in(4, Some(2)),
        ]);
        assert_eq!(ids(&ordered), vec![2, 4, 3, 1]);
        assert!(ordered.windows(2).all(|w| w[0].due_at <= w[1].due_at));
    }

    #[test]
    fn equal_due_times_keep_input_order() {
        let ordered = order_by_due(vec![
            due_in(7, Some(2)),
            due_in(3, Some(1)),
            due_in(9, Some(2)),
            due_in(1, Some(2)),
        ]);
        assert_eq!(ids(&ordered), vec![3, 7, 9, 1]);

        let permuted = order_by_due(vec![
            due_in(1, Some(2)),
            due_in(9, Some(2)),
            due_in(3, Some(1)),
            due_in(7, Some(2)),
        ]);
        assert_eq!(ids(&permuted), vec![3, 1, 9, 7]);
    }

    #[test]
    fn missing_due_time_sorts_first() {
        let ordered = order_by_due(vec![due_in(1, Some(1)), due_in(2, None)]);
        assert_eq!(ids(&ordered), vec![2, 1]);
    }
}
