#[cfg(test)]
mod tests {
    use crate::config::{Region, RegionConfig, RegionProfile};
    use crate::core::domain::Cell;
    use crate::error::ScheduleError;
    use crate::parsing::assembler::{assemble_weeks, PENDING_ROOM};

    /// One trailing room closes ranges of both teachers
    #[test]
    fn test_trailing_room_closes_all_pending_ranges() {
        let weeks = assemble_weeks("高等数学", "张三[1-2]李四[3-4]H304", Region::Harbin.profile()).unwrap();

        assert_eq!(weeks.len(), 4);
        assert_eq!(weeks[&1], Cell::new("高等数学", "张三", "H304"));
        assert_eq!(weeks[&2], Cell::new("高等数学", "张三", "H304"));
        assert_eq!(weeks[&3], Cell::new("高等数学", "李四", "H304"));
        assert_eq!(weeks[&4], Cell::new("高等数学", "李四", "H304"));
    }

    #[test]
    fn test_missing_room_gets_placeholder() {
        let weeks = assemble_weeks("大学物理", "王五[1-3]", Region::Harbin.profile()).unwrap();

        assert_eq!(weeks.len(), 3);
        assert!(weeks.values().all(|cell| cell.room == PENDING_ROOM));
        assert!(weeks.values().all(|cell| cell.teacher == "王五"));
    }

    #[test]
    fn test_rooms_close_only_ranges_before_them() {
        let weeks = assemble_weeks(
            "大学物理",
            "王五[1-2]H101[3-4]正心楼202[5]",
            Region::Harbin.profile(),
        )
        .unwrap();

        assert_eq!(weeks[&1].room, "H101");
        assert_eq!(weeks[&3].room, "正心楼202");
        assert_eq!(weeks[&5].room, PENDING_ROOM);
        assert!(weeks.values().all(|cell| cell.teacher == "王五"));
    }

    #[test]
    fn test_range_before_any_teacher_has_empty_teacher() {
        let weeks = assemble_weeks("体育", "[1-2]H101", Region::Harbin.profile()).unwrap();
        assert_eq!(weeks[&1].teacher, "");
        assert_eq!(weeks[&2].room, "H101");
    }

    /// Overlapping weeks take the later range
    #[test]
    fn test_later_range_wins_on_overlap() {
        let weeks = assemble_weeks("高等数学", "张三[1-4]H304李四[3-6]H305", Region::Harbin.profile()).unwrap();

        assert_eq!(weeks[&2].teacher, "张三");
        assert_eq!(weeks[&3], Cell::new("高等数学", "李四", "H305"));
        assert_eq!(weeks[&4].room, "H305");
        assert_eq!(weeks.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_repeated_range_text_is_tracked_per_occurrence() {
        let weeks = assemble_weeks("高等数学", "张三[1-2]H304李四[1-2]H305", Region::Harbin.profile()).unwrap();

        assert_eq!(weeks[&1], Cell::new("高等数学", "李四", "H305"));
        assert_eq!(weeks[&2], Cell::new("高等数学", "李四", "H305"));
    }

    /// The second `[1-2]` keeps its own teacher and room
    #[test]
    fn test_repeated_range_text_keeps_scan_order() {
        let weeks = assemble_weeks(
            "高等数学",
            "张三[1-2]H304[2-3]H305李四[1-2]H306",
            Region::Harbin.profile(),
        )
        .unwrap();

        assert_eq!(weeks.len(), 3);
        assert_eq!(weeks[&1], Cell::new("高等数学", "李四", "H306"));
        assert_eq!(weeks[&2], Cell::new("高等数学", "李四", "H306"));
        assert_eq!(weeks[&3], Cell::new("高等数学", "张三", "H305"));
    }

    #[test]
    fn test_cleanup_runs_before_tokenizing() {
        let weeks = assemble_weeks("线性代数", "赵六[1-8]单周H201", Region::Harbin.profile()).unwrap();
        assert_eq!(weeks.keys().copied().collect::<Vec<_>>(), vec![1, 3, 5, 7]);

        let weeks = assemble_weeks("线性代数", "赵六[1-2，5]周H201", Region::Harbin.profile()).unwrap();
        assert_eq!(weeks.keys().copied().collect::<Vec<_>>(), vec![1, 2, 5]);
    }

    #[test]
    fn test_shenzhen_expression() {
        let weeks = assemble_weeks(
            "电路",
            "[孙七][1-4周][T2303][周八][5-8双周][T2304]",
            Region::Shenzhen.profile(),
        )
        .unwrap();

        assert_eq!(weeks[&1], Cell::new("电路", "[孙七]", "[T2303]"));
        assert_eq!(weeks[&6], Cell::new("电路", "[周八]", "[T2304]"));
        assert!(!weeks.contains_key(&5));
    }

    #[test]
    fn test_unknown_unit_aborts_expression() {
        let mut config = RegionConfig::harbin();
        config.unit_pattern = format!("{}|(#\\w+)", config.unit_pattern);
        let profile = RegionProfile::from_config(config).unwrap();

        let err = assemble_weeks("高等数学", "张三[1-2]#lost", &profile).unwrap_err();
        assert!(matches!(err, ScheduleError::Classification { unit, .. } if unit == "#lost"));
    }

    #[test]
    fn test_empty_expression_yields_empty_map() {
        let weeks = assemble_weeks("高等数学", "", Region::Harbin.profile()).unwrap();
        assert!(weeks.is_empty());
    }
}
