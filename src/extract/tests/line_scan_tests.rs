use crate::config::ScanOrder;
use crate::extract::{FieldKind, scan_lines};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_then_value_lines() {
        let lines = [
            "課程名稱",
            "臨床藥事照護研討會",
            "課程日期",
            "114/03/07 ~ 114/03/08",
            "積分",
            "12",
            "報名資訊",
            "開放報名中",
        ];
        let fields = scan_lines(&lines, ScanOrder::LastMatch);
        assert_eq!(fields.title.as_deref(), Some("臨床藥事照護研討會"));
        assert_eq!(fields.period.as_deref(), Some("114/03/07 ~ 114/03/08"));
        assert_eq!(fields.credits.as_deref(), Some("12"));
        assert_eq!(fields.registration.as_deref(), Some("開放報名中"));
    }

    #[test]
    fn test_separator_takes_precedence_over_next_line() {
        let lines = ["積分 | 12分", "99"];
        let fields = scan_lines(&lines, ScanOrder::LastMatch);
        assert_eq!(fields.credits.as_deref(), Some("12分"));
    }

    #[test]
    fn test_text_after_last_separator() {
        let lines = ["課程名稱 | 主辦 | 藥物安全講座"];
        let fields = scan_lines(&lines, ScanOrder::LastMatch);
        assert_eq!(fields.title.as_deref(), Some("藥物安全講座"));
    }

    #[test]
    fn test_last_label_line_wins() {
        let lines = ["積分", "10", "說明", "積分", "12"];
        let fields = scan_lines(&lines, ScanOrder::LastMatch);
        assert_eq!(fields.credits.as_deref(), Some("12"));
    }

    #[test]
    fn test_first_match_order_keeps_first_value() {
        let lines = ["積分", "10", "說明", "積分", "12"];
        let fields = scan_lines(&lines, ScanOrder::FirstMatch);
        assert_eq!(fields.credits.as_deref(), Some("10"));
    }

    #[test]
    fn test_implausible_next_lines_are_ignored() {
        let lines = [
            "課程名稱", "短", // title needs more than 3 chars
            "日期", "明天", // date needs / ~ or -
            "學分", "未定", // credits need a digit
            "報名資訊", "額滿", // registration needs more than 3 chars
        ];
        let fields = scan_lines(&lines, ScanOrder::LastMatch);
        assert_eq!(fields.title, None);
        assert_eq!(fields.period, None);
        assert_eq!(fields.credits, None);
        assert_eq!(fields.registration, None);
    }

    #[test]
    fn test_implausible_later_label_keeps_earlier_value() {
        let lines = ["積分", "8", "積分", "待公告"];
        let fields = scan_lines(&lines, ScanOrder::LastMatch);
        assert_eq!(fields.credits.as_deref(), Some("8"));
    }

    #[test]
    fn test_label_on_last_line_has_no_value() {
        let fields = scan_lines(&["課程名稱"], ScanOrder::LastMatch);
        assert_eq!(fields.title, None);
    }

    #[test]
    fn test_full_width_digits_count_as_credits() {
        let fields = scan_lines(&["積分", "１２分"], ScanOrder::LastMatch);
        assert_eq!(fields.credits.as_deref(), Some("１２分"));
    }

    #[test]
    fn test_label_precedence() {
        assert_eq!(FieldKind::for_label_line("課程主題"), Some(FieldKind::Title));
        assert_eq!(FieldKind::for_label_line("課程日期"), Some(FieldKind::Period));
        assert_eq!(FieldKind::for_label_line("學分數"), Some(FieldKind::Credits));
        assert_eq!(
            FieldKind::for_label_line("報名資訊"),
            Some(FieldKind::Registration)
        );
        assert_eq!(FieldKind::for_label_line("聯絡人"), None);
    }
}
