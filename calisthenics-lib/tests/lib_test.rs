use anyhow::Result;
use calisthenics_lib::{
    group_by_category, parse_calendar_date, ClickOutcome, Config, ConfigError, DraftDefaults,
    ExerciseCategory, ExerciseEntry, FormError, InteractionController, NewWorkout, StoreChange,
    SubmitOutcome, TrackerService, View, WeekStart, WorkoutId, WorkoutStore,
};
use calisthenics_lib::form::{recurrence_dates, MAX_RECURRING_WEEKS};
use chrono::NaiveDate;
use std::cell::RefCell;
use std::rc::Rc;

// Helper function to create a test service without touching the filesystem
fn create_test_service() -> TrackerService {
    TrackerService::with_config(Config::default(), "test_config.toml".into())
}

fn date(s: &str) -> NaiveDate {
    parse_calendar_date(s).unwrap()
}

// Position of an exercise inside its category, as the form lists it.
fn index_of(category: ExerciseCategory, name: &str) -> usize {
    category
        .exercises()
        .iter()
        .position(|&n| n == name)
        .unwrap()
}

/// Store with Push-ups 3x8 and Squats 4x10 scheduled on 2024-06-03 and the
/// two following weeks.
fn schedule_recurring_scenario(controller: &mut InteractionController) -> Result<Vec<WorkoutId>> {
    assert_eq!(
        controller.on_date_click(date("2024-06-03")),
        ClickOutcome::OpenedForm
    );
    let form = controller.form_mut();
    let push_ups = index_of(ExerciseCategory::Push, "Push-ups");
    let squats = index_of(ExerciseCategory::Legs, "Squats");
    form.toggle_checked(ExerciseCategory::Push, push_ups)?;
    form.toggle_checked(ExerciseCategory::Legs, squats)?;
    form.set_sets(ExerciseCategory::Legs, squats, "4")?;
    form.set_reps(ExerciseCategory::Legs, squats, "10")?;
    form.toggle_recurring()?;
    form.set_recurring_weeks("2")?;

    match controller.submit_form()? {
        SubmitOutcome::Created(ids) => Ok(ids),
        other => panic!("expected a create, got {other:?}"),
    }
}

#[test]
fn test_recurring_scenario_creates_three_weekly_workouts() -> Result<()> {
    let mut service = create_test_service();
    let ids = schedule_recurring_scenario(&mut service.controller)?;
    assert_eq!(ids.len(), 3);

    let store = service.controller.store();
    assert_eq!(store.len(), 3);
    let expected = vec![
        ExerciseEntry::new("Push-ups", 3, 8),
        ExerciseEntry::new("Squats", 4, 10),
    ];
    for day in ["2024-06-03", "2024-06-10", "2024-06-17"] {
        let record = store
            .find_by_date(date(day))
            .unwrap_or_else(|| panic!("no workout on {day}"));
        assert_eq!(record.exercises, expected);
        assert_eq!(record.date_key(), day);
    }

    // Ids are distinct
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 3);

    assert!(!service.controller.form().is_open());
    Ok(())
}

#[test]
fn test_edit_scenario_only_touches_edited_record() -> Result<()> {
    let mut service = create_test_service();
    let ids = schedule_recurring_scenario(&mut service.controller)?;
    let controller = &mut service.controller;

    // Existing date shows details first
    assert_eq!(
        controller.on_date_click(date("2024-06-03")),
        ClickOutcome::ShowedDetails(ids[0])
    );
    assert!(controller.on_edit_requested(ids[0]));
    assert!(controller.details().is_none());
    assert!(controller.form().is_editing());

    let squats = index_of(ExerciseCategory::Legs, "Squats");
    // Recurrence is ignored when editing
    controller.form_mut().toggle_recurring()?;
    assert!(!controller.form_mut().toggle_checked(ExerciseCategory::Legs, squats)?);
    assert_eq!(controller.submit_form()?, SubmitOutcome::Updated(ids[0]));

    let store = controller.store();
    assert_eq!(store.len(), 3);
    let edited = store.find_by_id(ids[0]).unwrap();
    assert_eq!(edited.date, date("2024-06-03"));
    assert_eq!(edited.exercises, vec![ExerciseEntry::new("Push-ups", 3, 8)]);
    for id in &ids[1..] {
        assert_eq!(store.find_by_id(*id).unwrap().exercises.len(), 2);
    }
    Ok(())
}

#[test]
fn test_edit_draft_is_prefilled_from_record() -> Result<()> {
    let mut service = create_test_service();
    let ids = schedule_recurring_scenario(&mut service.controller)?;
    let controller = &mut service.controller;
    controller.on_edit_requested(ids[1]);

    let draft = controller.form().draft().unwrap();
    let squats = &draft.exercises(ExerciseCategory::Legs)[index_of(ExerciseCategory::Legs, "Squats")];
    assert!(squats.checked);
    assert_eq!((squats.sets, squats.reps), (4, 10));
    let lunges = &draft.exercises(ExerciseCategory::Legs)[index_of(ExerciseCategory::Legs, "Lunges")];
    assert!(!lunges.checked);
    assert_eq!((lunges.sets, lunges.reps), (3, 8));
    assert_eq!(draft.checked_count(ExerciseCategory::Pull), 0);
    assert_eq!(controller.form().date(), Some(date("2024-06-10")));
    Ok(())
}

#[test]
fn test_submit_without_exercise_is_rejected() -> Result<()> {
    let mut service = create_test_service();
    let controller = &mut service.controller;
    controller.on_date_click(date("2024-06-05"));

    let err = controller.submit_form().unwrap_err();
    assert_eq!(err, FormError::NoExerciseSelected);
    assert_eq!(err.to_string(), "Please select at least one exercise.");
    assert!(controller.store().is_empty());
    assert!(controller.form().is_open());
    assert!(matches!(controller.view(), View::Form(_)));
    Ok(())
}

#[test]
fn test_non_recurring_create_adds_single_record() -> Result<()> {
    let mut service = create_test_service();
    let controller = &mut service.controller;
    controller.on_date_click(date("2024-02-29"));
    controller.form_mut().toggle_checked(ExerciseCategory::Core, 0)?;
    // Weeks are ignored while recurrence is off
    controller.form_mut().set_recurring_weeks("5")?;

    let outcome = controller.submit_form()?;
    assert!(matches!(outcome, SubmitOutcome::Created(ref ids) if ids.len() == 1));
    let record = controller.store().find_by_date(date("2024-02-29")).unwrap();
    assert_eq!(record.exercises, vec![ExerciseEntry::new("Plank", 3, 8)]);
    Ok(())
}

#[test]
fn test_invalid_numbers_are_rejected_at_input() -> Result<()> {
    let mut service = create_test_service();
    let controller = &mut service.controller;
    controller.on_date_click(date("2024-06-03"));
    let form = controller.form_mut();

    for bad in ["0", "-2", "abc", "", "2.5"] {
        assert!(matches!(
            form.set_sets(ExerciseCategory::Push, 0, bad),
            Err(FormError::InvalidNumber { .. })
        ));
        assert!(form.set_reps(ExerciseCategory::Push, 0, bad).is_err());
        assert!(form.set_recurring_weeks(bad).is_err());
    }
    let row = &form.draft().unwrap().exercises(ExerciseCategory::Push)[0];
    assert_eq!((row.sets, row.reps), (3, 8));
    assert_eq!(form.draft().unwrap().recurring_weeks(), 1);

    assert_eq!(form.set_sets(ExerciseCategory::Push, 0, " 12 ")?, 12);
    assert_eq!(form.adjust_reps(ExerciseCategory::Push, 0, -20)?, 1);
    assert_eq!(form.adjust_sets(ExerciseCategory::Push, 0, 1)?, 13);
    assert!(matches!(
        form.toggle_checked(ExerciseCategory::Push, 99),
        Err(FormError::UnknownExercise { index: 99, .. })
    ));
    Ok(())
}

#[test]
fn test_cancel_and_escape_discard_draft() -> Result<()> {
    let mut service = create_test_service();
    let controller = &mut service.controller;
    controller.on_date_click(date("2024-06-03"));
    controller.form_mut().toggle_checked(ExerciseCategory::Pull, 0)?;
    controller.form_mut().toggle_category(ExerciseCategory::Pull)?;
    assert!(controller.cancel_form());
    assert!(controller.store().is_empty());

    // Reopening starts from a clean draft
    controller.on_date_click(date("2024-06-03"));
    let draft = controller.form().draft().unwrap();
    assert_eq!(draft.checked_count(ExerciseCategory::Pull), 0);
    assert!(!draft.is_expanded(ExerciseCategory::Pull));
    assert!(!draft.is_recurring());

    assert!(controller.on_escape());
    assert!(!controller.form().is_open());
    assert!(!controller.on_escape());
    assert!(controller.form_mut().toggle_recurring().is_err());
    Ok(())
}

#[test]
fn test_category_expansion_and_focus() -> Result<()> {
    let mut service = create_test_service();
    let controller = &mut service.controller;
    controller.on_date_click(date("2024-06-03"));
    let form = controller.form_mut();

    assert!(form.toggle_category(ExerciseCategory::Legs)?);
    form.focus_category(ExerciseCategory::Legs)?;
    let draft = form.draft().unwrap();
    assert!(draft.is_expanded(ExerciseCategory::Legs));
    assert!(!draft.is_expanded(ExerciseCategory::Push));
    assert_eq!(draft.focused_category(), Some(ExerciseCategory::Legs));

    form.blur()?;
    assert_eq!(form.draft().unwrap().focused_category(), None);
    assert!(!form.toggle_category(ExerciseCategory::Legs)?);
    Ok(())
}

#[test]
fn test_event_click_and_delete() -> Result<()> {
    let mut service = create_test_service();
    let ids = schedule_recurring_scenario(&mut service.controller)?;
    let controller = &mut service.controller;

    assert_eq!(
        controller.on_event_click(&ids[2].to_string()),
        ClickOutcome::ShowedDetails(ids[2])
    );
    assert!(matches!(controller.view(), View::Details(r) if r.id == ids[2]));

    let removed = controller.on_delete_requested(ids[2]).unwrap();
    assert_eq!(removed.date, date("2024-06-17"));
    assert!(controller.details().is_none());
    assert_eq!(controller.store().len(), 2);

    // Stale and garbage ids are absorbed
    assert_eq!(controller.on_event_click(&ids[2].to_string()), ClickOutcome::Ignored);
    assert_eq!(controller.on_event_click("not-an-id"), ClickOutcome::Ignored);
    assert!(controller.on_delete_requested(ids[2]).is_none());
    assert!(!controller.on_edit_requested(ids[2]));
    assert_eq!(controller.store().len(), 2);

    // The freed date can be scheduled again
    assert_eq!(
        controller.on_date_click(date("2024-06-17")),
        ClickOutcome::OpenedForm
    );
    Ok(())
}

#[test]
fn test_clicks_ignored_while_panel_open() -> Result<()> {
    let mut service = create_test_service();
    let ids = schedule_recurring_scenario(&mut service.controller)?;
    let controller = &mut service.controller;

    controller.on_date_click(date("2024-06-03"));
    assert_eq!(
        controller.on_date_click(date("2024-07-01")),
        ClickOutcome::Ignored
    );
    assert_eq!(controller.on_event_click(&ids[1].to_string()), ClickOutcome::Ignored);
    controller.close_details();

    controller.on_date_click(date("2024-07-01"));
    assert_eq!(
        controller.on_date_click(date("2024-06-03")),
        ClickOutcome::Ignored
    );
    assert_eq!(controller.form().date(), Some(date("2024-07-01")));
    Ok(())
}

#[test]
fn test_events_projection() -> Result<()> {
    let mut service = create_test_service();
    let ids = schedule_recurring_scenario(&mut service.controller)?;

    let events = service.controller.events();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].id, ids[0]);
    assert_eq!(events[0].title, "Push-ups, Squats");
    assert_eq!(events[0].date, date("2024-06-03"));
    assert!(events.iter().all(|e| e.is_all_day));
    Ok(())
}

#[test]
fn test_store_ids_and_noops() {
    let mut store = WorkoutStore::new();
    let day = date("2024-01-01");
    let ids = store.add(vec![
        NewWorkout {
            date: day,
            exercises: vec![ExerciseEntry::new("Dips", 3, 8)],
        },
        NewWorkout {
            date: day,
            exercises: vec![ExerciseEntry::new("Rows", 3, 8)],
        },
    ]);
    // No date de-duplication in the store itself
    assert_eq!(store.len(), 2);
    assert!(ids[0] < ids[1]);
    let later = store.add(vec![NewWorkout {
        date: day,
        exercises: vec![],
    }]);
    assert!(later[0] > ids[1]);

    assert!(!store.update("999".parse().unwrap(), vec![]));
    assert!(store.remove("999".parse().unwrap()).is_none());
    assert_eq!(store.len(), 3);
    assert!(store.add(Vec::<NewWorkout>::new()).is_empty());
}

#[test]
fn test_store_sorted_and_monthly_views() {
    let mut store = WorkoutStore::new();
    let entry = vec![ExerciseEntry::new("L-sit", 2, 5)];
    for day in ["2024-03-10", "2024-02-01", "2024-03-01"] {
        store.add(vec![NewWorkout {
            date: date(day),
            exercises: entry.clone(),
        }]);
    }
    let sorted: Vec<String> = store.sorted_by_date().iter().map(|r| r.date_key()).collect();
    assert_eq!(sorted, vec!["2024-02-01", "2024-03-01", "2024-03-10"]);
    assert_eq!(store.records_in_month(2024, 3).count(), 2);
    assert_eq!(store.records_in_month(2023, 3).count(), 0);
    // Insertion order is kept in records()
    assert_eq!(store.records()[0].date_key(), "2024-03-10");
}

#[test]
fn test_store_notifies_subscribers() -> Result<()> {
    let mut controller = InteractionController::new(DraftDefaults::default());
    let seen: Rc<RefCell<Vec<(StoreChange, usize)>>> = Rc::default();
    let sink = Rc::clone(&seen);
    let subscription = controller
        .store_mut()
        .subscribe(move |change, records| sink.borrow_mut().push((change.clone(), records.len())));

    let ids = schedule_recurring_scenario(&mut controller)?;
    controller.on_edit_requested(ids[0]);
    controller.submit_form()?;
    controller.on_delete_requested(ids[1]);
    // No-ops do not notify
    controller.on_delete_requested(ids[1]);

    assert_eq!(
        *seen.borrow(),
        vec![
            (StoreChange::Added(ids.clone()), 3),
            (StoreChange::Updated(ids[0]), 3),
            (StoreChange::Removed(ids[1]), 2),
        ]
    );

    assert!(controller.store_mut().unsubscribe(subscription));
    controller.on_delete_requested(ids[2]);
    assert_eq!(seen.borrow().len(), 3);
    assert!(!controller.store_mut().unsubscribe(subscription));
    Ok(())
}

#[test]
fn test_group_by_category_for_details() {
    let exercises = vec![
        ExerciseEntry::new("Plank", 1, 1),
        ExerciseEntry::new("Dips", 2, 2),
        ExerciseEntry::new("Unknown Move", 3, 3),
        ExerciseEntry::new("Push-ups", 4, 4),
    ];
    let groups = group_by_category(&exercises);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].category, ExerciseCategory::Push);
    assert_eq!(
        groups[0].exercises,
        vec![
            ExerciseEntry::new("Dips", 2, 2),
            ExerciseEntry::new("Push-ups", 4, 4)
        ]
    );
    assert_eq!(groups[1].category, ExerciseCategory::Core);
    assert_eq!(groups[1].exercises[0].to_string(), "Plank - 1 sets × 1 reps");
    assert!(group_by_category(&[]).is_empty());
}

#[test]
fn test_parse_calendar_date() {
    assert_eq!(
        parse_calendar_date("2024-06-03T00:00:00.000Z").unwrap(),
        date("2024-06-03")
    );
    assert_eq!(parse_calendar_date(" 2024-06-03 ").unwrap().to_string(), "2024-06-03");
    assert!(parse_calendar_date("03.06.2024").is_err());
    assert!(parse_calendar_date("2024-02-30").is_err());
}

#[test]
fn test_config_defaults_and_draft_defaults() -> Result<()> {
    let mut config = Config::default();
    assert_eq!(config.week_start, WeekStart::Monday);
    config.default_sets = 5;
    config.default_reps = 12;
    let mut service = TrackerService::with_config(config, "test_config.toml".into());
    service.controller.on_date_click(date("2024-06-03"));
    let row = &service.controller.form().draft().unwrap().exercises(ExerciseCategory::Pull)[0];
    assert_eq!((row.sets, row.reps), (5, 12));
    let (header, event) = service.theme_colors()?;
    assert_eq!(format!("{header:?}"), "Green");
    assert_eq!(format!("{event:?}"), "Blue");
    Ok(())
}

#[test]
fn test_config_load_save_roundtrip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = calisthenics_lib::config_path_in(dir.path());

    // Missing file is created with defaults
    let loaded = calisthenics_lib::load_config_util(&path)?;
    assert_eq!(loaded, Config::default());
    assert!(path.exists());

    // Partial files fall back to defaults for missing keys
    std::fs::write(&path, "default_reps = 15\nweek_start = \"sunday\"\n")?;
    let loaded = calisthenics_lib::load_config_util(&path)?;
    assert_eq!(loaded.default_reps, 15);
    assert_eq!(loaded.default_sets, 3);
    assert_eq!(loaded.week_start, WeekStart::Sunday);

    let mut changed = loaded.clone();
    changed.theme.event_color = "magenta".into();
    calisthenics_lib::save_config_util(&path, &changed)?;
    assert_eq!(calisthenics_lib::load_config_util(&path)?, changed);

    let service = TrackerService::initialize_in(dir.path())?;
    assert_eq!(service.config, changed);
    assert_eq!(service.get_config_path(), path.as_path());
    Ok(())
}

#[test]
fn test_config_rejects_invalid_values() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = calisthenics_lib::config_path_in(dir.path());

    std::fs::write(&path, "default_sets = 0\n")?;
    let err = calisthenics_lib::load_config_util(&path).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidValue {
            key: "default_sets",
            value: 0,
            ..
        }
    ));

    std::fs::write(&path, "default_recurring_weeks = 500\n")?;
    assert!(matches!(
        calisthenics_lib::load_config_util(&path),
        Err(ConfigError::InvalidValue {
            key: "default_recurring_weeks",
            max: MAX_RECURRING_WEEKS,
            ..
        })
    ));

    std::fs::write(&path, "[theme]\nheader_color = \"Chartreuse\"\n")?;
    assert!(matches!(
        calisthenics_lib::load_config_util(&path),
        Err(ConfigError::InvalidColor(_))
    ));

    std::fs::write(&path, "default_sets = \"many\"\n")?;
    assert!(matches!(
        calisthenics_lib::load_config_util(&path),
        Err(ConfigError::TomlParse(_))
    ));
    assert!(TrackerService::initialize_in(dir.path()).is_err());
    Ok(())
}

#[test]
fn test_recurrence_skips_dates_that_already_have_a_workout() -> Result<()> {
    let mut service = create_test_service();
    let controller = &mut service.controller;
    controller.on_date_click(date("2024-06-10"));
    controller.form_mut().toggle_checked(ExerciseCategory::Core, 0)?;
    controller.submit_form()?;
    let existing = controller.store().find_by_date(date("2024-06-10")).unwrap().id;

    let ids = schedule_recurring_scenario(controller)?;
    assert_eq!(ids.len(), 2);

    let store = controller.store();
    assert_eq!(store.len(), 3);
    for day in ["2024-06-03", "2024-06-10", "2024-06-17"] {
        let on_day = store.records().iter().filter(|r| r.date == date(day)).count();
        assert_eq!(on_day, 1, "workouts on {day}");
    }
    // The earlier workout keeps its date and exercises
    let kept = store.find_by_date(date("2024-06-10")).unwrap();
    assert_eq!(kept.id, existing);
    assert_eq!(kept.exercises, vec![ExerciseEntry::new("Plank", 3, 8)]);
    Ok(())
}

#[test]
fn test_recurrence_past_date_range_is_rejected() -> Result<()> {
    let mut service = create_test_service();
    let controller = &mut service.controller;
    controller.on_date_click(NaiveDate::MAX);
    controller.form_mut().toggle_checked(ExerciseCategory::Push, 0)?;
    controller.form_mut().toggle_recurring()?;

    let err = controller.submit_form().unwrap_err();
    assert!(matches!(err, FormError::DateOutOfRange { weeks: 1, .. }));
    assert!(controller.form().is_open());
    assert!(controller.store().is_empty());
    Ok(())
}

#[test]
fn test_recurring_weeks_are_capped() -> Result<()> {
    let mut service = create_test_service();
    let controller = &mut service.controller;
    controller.on_date_click(date("2024-06-03"));
    let form = controller.form_mut();

    let err = form.set_recurring_weeks("9999999").unwrap_err();
    assert!(matches!(err, FormError::InvalidNumber { .. }));
    assert!(err.to_string().contains(&MAX_RECURRING_WEEKS.to_string()));
    assert_eq!(form.draft().unwrap().recurring_weeks(), 1);

    let max = MAX_RECURRING_WEEKS.to_string();
    assert_eq!(form.set_recurring_weeks(&max)?, MAX_RECURRING_WEEKS);
    assert_eq!(form.adjust_recurring_weeks(10)?, MAX_RECURRING_WEEKS);
    let too_long = recurrence_dates(date("2024-06-03"), MAX_RECURRING_WEEKS + 1);
    assert!(matches!(too_long, Err(FormError::InvalidNumber { .. })));
    Ok(())
}

#[test]
fn test_saving_edit_of_deleted_workout_reports_missing() -> Result<()> {
    let mut service = create_test_service();
    let ids = schedule_recurring_scenario(&mut service.controller)?;
    let controller = &mut service.controller;

    assert!(controller.on_edit_requested(ids[2]));
    assert!(controller.on_delete_requested(ids[2]).is_some());
    assert_eq!(controller.submit_form()?, SubmitOutcome::Missing(ids[2]));

    assert!(!controller.form().is_open());
    assert_eq!(controller.store().len(), 2);
    assert!(controller.store().find_by_date(date("2024-06-17")).is_none());
    Ok(())
}
