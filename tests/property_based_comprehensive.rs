//! Property-based tests for the roster model
//!
//! Core features tested:
//! 1. Threshold validation and reset
//! 2. Percentage bounds
//! 3. Attendance cap
//! 4. Sort ordering and stability
//! 5. Lossless save/load

use proptest::prelude::*;
use rollbook::storage::{self, LoadMode};
use rollbook::{Roster, Student, TOTAL_CLASSES};

fn student_counts() -> impl Strategy<Value = (u32, u32)> {
    (0u32..=TOTAL_CLASSES).prop_flat_map(|attendance| (Just(attendance), attendance..=500))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_threshold_always_in_range(value in -1000.0f64..1000.0) {
        let mut roster = Roster::new();
        let accepted = roster.set_threshold(value).is_ok();
        let t = roster.threshold().value();

        prop_assert!((0.0..=100.0).contains(&t));
        if accepted {
            prop_assert_eq!(t, value);
        } else {
            prop_assert_eq!(t, 75.0);
        }
    }

    #[test]
    fn prop_percentage_between_0_and_100((attendance, total) in student_counts()) {
        let s = Student::with_counts("P", 1, attendance, total);
        let pct = s.attendance_percentage();
        prop_assert!((0.0..=100.0).contains(&pct));
    }

    #[test]
    fn prop_marking_never_exceeds_cap(marks in 0usize..250) {
        let mut roster = Roster::new();
        roster.add("P", 1).unwrap();
        for _ in 0..marks {
            roster.mark_attendance(1);
        }
        let s = roster.find_by_roll(1).unwrap();
        prop_assert_eq!(s.attendance(), (marks as u32).min(TOTAL_CLASSES));
        prop_assert_eq!(s.total_classes(), s.attendance());
    }

    #[test]
    fn prop_sorted_is_descending_and_stable(
        counts in prop::collection::vec(student_counts(), 0..20),
    ) {
        let students: Vec<Student> = counts
            .iter()
            .enumerate()
            .map(|(i, &(a, t))| Student::with_counts(format!("S{}", i), i as i64, a, t))
            .collect();
        let roster = Roster::from_students(students);
        let sorted = roster.sorted_by_percentage_desc();

        prop_assert_eq!(sorted.len(), roster.len());
        for pair in sorted.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(a.attendance_percentage() >= b.attendance_percentage());
            if a.attendance_percentage() == b.attendance_percentage() {
                prop_assert!(a.roll() < b.roll());
            }
        }
    }

    #[test]
    fn prop_save_load_lossless(
        entries in prop::collection::vec(("[A-Za-z][A-Za-z ]{0,12}", student_counts()), 0..10),
    ) {
        let students: Vec<Student> = entries
            .iter()
            .enumerate()
            .map(|(i, (name, (a, t)))| Student::with_counts(name.as_str(), i as i64, *a, *t))
            .collect();
        let roster = Roster::from_students(students);

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("students.csv");
        storage::save(&roster, &path).unwrap();
        let reloaded = storage::load(&path, LoadMode::Strict).unwrap().roster;

        prop_assert_eq!(reloaded.students(), roster.students());
    }
}
