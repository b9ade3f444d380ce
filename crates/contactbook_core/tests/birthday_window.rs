use chrono::{Datelike, NaiveDate, Weekday};
use contactbook_core::{AddressBook, Record, WeeklyBirthdays};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn book_with(today: NaiveDate, contacts: &[(&str, Option<&str>)]) -> AddressBook {
    let mut book = AddressBook::new();
    for (name, birthday) in contacts {
        let mut record = Record::new(*name);
        record.add_phone("1234567890").unwrap();
        if let Some(birthday) = birthday {
            record.add_birthday_at(birthday, today).unwrap();
        }
        book.add_record(record);
    }
    book
}

fn names_by_day(upcoming: &WeeklyBirthdays<'_>) -> Vec<(NaiveDate, Vec<String>)> {
    upcoming
        .iter()
        .map(|(day, records)| {
            let names = records
                .iter()
                .map(|record| record.name().to_string())
                .collect();
            (*day, names)
        })
        .collect()
}

#[test]
fn weekend_birthdays_move_to_monday_after_monday_records() {
    // Wednesday; the window is Mon 17.06 ..= Sun 23.06.
    let today = date(2024, 6, 12);
    let book = book_with(
        today,
        &[
            ("Alice", Some("17.06.1990")),
            ("Bob", Some("22.06.1985")),
            ("Carol", Some("23.06.1970")),
            ("Dave", Some("18.06.2000")),
            ("Eve", Some("21.06.1995")),
        ],
    );

    let upcoming = book.get_birthdays_per_week_at(today);

    assert_eq!(
        names_by_day(&upcoming),
        vec![
            (
                date(2024, 6, 17),
                vec!["Alice".to_string(), "Carol".to_string(), "Bob".to_string()]
            ),
            (date(2024, 6, 18), vec!["Dave".to_string()]),
            (date(2024, 6, 21), vec!["Eve".to_string()]),
        ]
    );
    assert!(upcoming
        .keys()
        .all(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun)));
}

#[test]
fn only_weekend_birthdays_still_produce_monday() {
    let today = date(2024, 6, 12);
    let book = book_with(today, &[("Bob", Some("22.06.1985"))]);

    let upcoming = book.get_birthdays_per_week_at(today);

    assert_eq!(
        names_by_day(&upcoming),
        vec![(date(2024, 6, 17), vec!["Bob".to_string()])]
    );
}

#[test]
fn empty_monday_is_not_reported() {
    let today = date(2024, 6, 12);
    let book = book_with(today, &[("Dave", Some("18.06.2001"))]);

    let upcoming = book.get_birthdays_per_week_at(today);

    assert_eq!(upcoming.len(), 1);
    assert!(upcoming.contains_key(&date(2024, 6, 18)));
}

#[test]
fn current_week_and_later_birthdays_are_excluded() {
    let today = date(2024, 6, 12);
    let book = book_with(
        today,
        &[
            ("Today", Some("12.06.1980")),
            ("ThisFriday", Some("14.06.1980")),
            ("Passed", Some("10.06.1980")),
            ("TwoWeeks", Some("24.06.1980")),
            ("NoBirthday", None),
        ],
    );

    assert!(book.get_birthdays_per_week_at(today).is_empty());
}

#[test]
fn earlier_month_day_rolls_over_to_next_year() {
    // Friday; the window is Mon 30.12.2024 ..= Sun 05.01.2025.
    let today = date(2024, 12, 27);
    let book = book_with(
        today,
        &[
            ("NewYearEve", Some("31.12.1990")),
            ("January", Some("02.01.1990")),
            ("Saturday", Some("04.01.1990")),
        ],
    );

    let upcoming = book.get_birthdays_per_week_at(today);

    assert_eq!(
        names_by_day(&upcoming),
        vec![
            (date(2024, 12, 30), vec!["Saturday".to_string()]),
            (date(2024, 12, 31), vec!["NewYearEve".to_string()]),
            (date(2025, 1, 2), vec!["January".to_string()]),
        ]
    );
}

#[test]
fn sunday_today_looks_at_the_following_day() {
    let today = date(2024, 6, 16);
    let book = book_with(today, &[("Alice", Some("17.06.1990"))]);

    let upcoming = book.get_birthdays_per_week_at(today);

    assert_eq!(
        names_by_day(&upcoming),
        vec![(date(2024, 6, 17), vec!["Alice".to_string()])]
    );
}

#[test]
fn monday_today_skips_its_own_week() {
    let today = date(2024, 6, 17);
    let book = book_with(
        today,
        &[("Alice", Some("17.06.1990")), ("Dave", Some("25.06.1990"))],
    );

    let upcoming = book.get_birthdays_per_week_at(today);

    assert_eq!(
        names_by_day(&upcoming),
        vec![(date(2024, 6, 25), vec!["Dave".to_string()])]
    );
}

#[test]
fn leap_day_birthday_is_reported_on_february_28() {
    // Wednesday; the window is Mon 24.02.2025 ..= Sun 02.03.2025.
    let today = date(2025, 2, 19);
    let book = book_with(today, &[("Leap", Some("29.02.2000"))]);

    let upcoming = book.get_birthdays_per_week_at(today);

    assert_eq!(
        names_by_day(&upcoming),
        vec![(date(2025, 2, 28), vec!["Leap".to_string()])]
    );
}

#[test]
fn query_does_not_mutate_book() {
    let today = date(2024, 6, 12);
    let book = book_with(today, &[("Bob", Some("22.06.1985"))]);
    let before = book.clone();

    let _ = book.get_birthdays_per_week_at(today);

    assert_eq!(book, before);
}
