use lease_docgen::config::RoomVariant;
use lease_docgen::contract::{visible_steps, StepOutcome, Wizard, WizardStep};
use lease_docgen::Person;

fn catalogue() -> Vec<RoomVariant> {
    vec![
        RoomVariant {
            id: "small".to_string(),
            name: "Malý pokoj".to_string(),
            description: "Pokoj pro jednu osobu".to_string(),
            max_occupants: 1,
            monthly_rent: 8000,
            fee_per_person: 2000,
            deposit_override: None,
            area_m2: 12,
            features: Vec::new(),
            meter_readings: None,
        },
        RoomVariant {
            id: "large".to_string(),
            name: "Velký pokoj".to_string(),
            description: "Pokoj pro jednu až dvě osoby".to_string(),
            max_occupants: 2,
            monthly_rent: 12000,
            fee_per_person: 2500,
            deposit_override: None,
            area_m2: 20,
            features: Vec::new(),
            meter_readings: None,
        },
    ]
}

fn tenant() -> Person {
    Person {
        first_name: "Petr".to_string(),
        last_name: "Svoboda".to_string(),
        document_number: "AB123456".to_string(),
        date_of_birth: None,
        address: "Krátká 12, 110 00 Praha".to_string(),
        phone: String::new(),
        email: String::new(),
    }
}

#[test]
fn blocked_until_a_unit_is_selected() {
    let variants = catalogue();
    let mut wizard = Wizard::new();

    assert_eq!(wizard.next(&variants), StepOutcome::Blocked);
    assert!(wizard.errors().contains_key("room_variant"));
    assert_eq!(wizard.step(), WizardStep::UnitSelection);

    wizard.agreement_mut().room_variant_id = Some("small".to_string());
    assert_eq!(wizard.next(&variants), StepOutcome::Moved(WizardStep::Tenant));
    assert!(wizard.errors().is_empty());
}

#[test]
fn single_occupant_unit_never_exposes_the_subtenant_step() {
    let variants = catalogue();
    let mut wizard = Wizard::for_unit("small");

    let sequence = visible_steps(wizard.agreement(), &variants);
    assert!(!sequence.contains(&WizardStep::Subtenant));

    wizard.agreement_mut().tenant = tenant();
    assert_eq!(wizard.next(&variants), StepOutcome::Moved(WizardStep::Period));

    // And the mirror direction skips it too.
    wizard.back(&variants);
    assert_eq!(wizard.step(), WizardStep::Tenant);
}

#[test]
fn two_occupant_unit_walks_through_the_subtenant_step() {
    let variants = catalogue();
    let mut wizard = Wizard::for_unit("large");
    wizard.agreement_mut().tenant = tenant();

    assert_eq!(
        wizard.next(&variants),
        StepOutcome::Moved(WizardStep::Subtenant)
    );
    assert_eq!(wizard.next(&variants), StepOutcome::Moved(WizardStep::Period));
}

#[test]
fn declining_the_subtenant_clears_stale_subtenant_data() {
    let variants = catalogue();
    let mut wizard = Wizard::for_unit("large");
    wizard.agreement_mut().tenant = tenant();
    wizard.next(&variants);
    assert_eq!(wizard.step(), WizardStep::Subtenant);

    // User filled the form, then unchecked the subtenant box.
    wizard.agreement_mut().subtenant.first_name = "Eva".to_string();
    wizard.agreement_mut().subtenant.last_name = "Malá".to_string();
    wizard.agreement_mut().has_subtenant = false;

    assert_eq!(wizard.next(&variants), StepOutcome::Moved(WizardStep::Period));
    assert_eq!(wizard.agreement().subtenant, Person::default());
}

#[test]
fn incomplete_subtenant_blocks_the_step() {
    let variants = catalogue();
    let mut wizard = Wizard::for_unit("large");
    wizard.agreement_mut().tenant = tenant();
    wizard.next(&variants);

    wizard.agreement_mut().has_subtenant = true;
    assert_eq!(wizard.next(&variants), StepOutcome::Blocked);
    assert!(wizard.errors().contains_key("first_name"));
    assert_eq!(wizard.step(), WizardStep::Subtenant);
}

#[test]
fn period_step_surfaces_the_range_error_separately() {
    let variants = catalogue();
    let mut wizard = Wizard::for_unit("small");
    wizard.agreement_mut().tenant = tenant();
    wizard.next(&variants);
    assert_eq!(wizard.step(), WizardStep::Period);

    wizard.agreement_mut().date_from = chrono::NaiveDate::from_ymd_opt(2025, 6, 1);
    wizard.agreement_mut().date_to = chrono::NaiveDate::from_ymd_opt(2025, 5, 1);
    assert_eq!(wizard.next(&variants), StepOutcome::Blocked);
    assert!(wizard.errors().contains_key("date_range"));
    assert!(!wizard.errors().contains_key("date_from"));
    assert!(!wizard.errors().contains_key("date_to"));
}

#[test]
fn terminal_step_reports_finished_instead_of_moving() {
    let variants = catalogue();
    let mut wizard = Wizard::for_unit("small");
    wizard.agreement_mut().tenant = tenant();
    wizard.agreement_mut().date_from = chrono::NaiveDate::from_ymd_opt(2025, 6, 1);
    wizard.agreement_mut().date_to = chrono::NaiveDate::from_ymd_opt(2026, 5, 31);

    wizard.next(&variants);
    assert_eq!(wizard.next(&variants), StepOutcome::Moved(WizardStep::Preview));
    assert_eq!(wizard.next(&variants), StepOutcome::Finished);
    assert_eq!(wizard.step(), WizardStep::Preview);
}

#[test]
fn back_from_the_first_step_is_a_no_op() {
    let variants = catalogue();
    let mut wizard = Wizard::new();
    wizard.back(&variants);
    assert_eq!(wizard.step(), WizardStep::UnitSelection);
}
