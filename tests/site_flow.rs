//! Public page flows driven against an in-memory API.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

mod common;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use common::{gallery_item, pump, render, Call, MockApi};
use shopfront::api::types::{Appointment, BookingResponse};
use shopfront::config::Config;
use shopfront::constants::{booking, messages};
use shopfront::page::Page;
use shopfront::site::layout::{self, Section};
use shopfront::site::{
    Focus, SiteController, FIELD_DATETIME, FIELD_EMAIL, FIELD_NAME, FIELD_PHONE, FIELD_SERVICE,
};
use shopfront::tasks::Command;

const FRAME: Duration = Duration::from_millis(100);

fn site() -> SiteController {
    SiteController::with_rng(&Config::default(), StdRng::seed_from_u64(7))
}

/// A controller sized for a 100x40 terminal with the loader finished.
fn ready_site() -> SiteController {
    let mut site = site();
    site.resize(100, 40);
    finish_loading(&mut site);
    site
}

fn finish_loading(site: &mut SiteController) {
    for _ in 0..1000 {
        if !site.loader().is_visible() {
            return;
        }
        site.tick(Duration::from_millis(500));
    }
    panic!("loader never finished");
}

fn settle(site: &mut SiteController) {
    for _ in 0..30 {
        site.tick(FRAME);
    }
}

fn press(site: &mut SiteController, code: KeyCode) -> Vec<Command> {
    site.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(site: &mut SiteController, text: &str) {
    for c in text.chars() {
        press(site, KeyCode::Char(c));
    }
}

fn fill_booking(site: &mut SiteController) {
    let form = site.booking_form_mut();
    form.set(FIELD_NAME, "Sam Carter");
    form.set(FIELD_EMAIL, "sam@example.com");
    form.set(FIELD_PHONE, "555-0100");
    form.set(FIELD_DATETIME, "2024-05-01T14:30");
    form.set(FIELD_SERVICE, "Haircut");
}

#[tokio::test]
async fn start_loads_gallery_and_survives_missing_pole() {
    let mut site = site();

    // No terminal size yet: the pole cannot be built, the page goes on
    let commands = site.start();
    assert_eq!(commands, vec![Command::LoadGallery]);
    assert!(site.pole().is_none());

    let api = MockApi {
        gallery: Some(vec![gallery_item("1", "Skin fade"), gallery_item("2", "Beard")]),
        ..MockApi::default()
    };
    pump(&mut site, &api, commands).await;

    let gallery = site.gallery().expect("gallery loaded");
    assert_eq!(gallery.len(), 2);
    assert_eq!(gallery[0].description, "Skin fade");
    assert_eq!(api.calls(), vec![Call::Gallery]);
}

#[tokio::test]
async fn failed_gallery_load_leaves_grid_absent() {
    let mut site = site();
    let commands = site.start();
    pump(&mut site, &MockApi::default(), commands).await;

    assert!(site.gallery().is_none());
    assert!(site.alert().is_none());
}

#[test]
fn pole_animates_once_sized() {
    let mut site = site();
    site.resize(100, 40);
    site.start();

    let pole = site.pole().expect("pole created");
    let (width, height) = site.layout().pole_pixels();
    assert_eq!(pole.frame().width, width);
    assert_eq!(pole.frame().height, height);
    let before = pole.rotation();

    site.tick(FRAME);
    site.tick(FRAME);

    let pole = site.pole().unwrap();
    assert_eq!(pole.frames(), 2);
    assert!(pole.rotation() > before);
}

#[test]
fn pole_is_built_once_the_window_has_room() {
    let mut site = site();
    site.resize(0, 0);
    site.start();
    assert!(site.pole().is_none());

    site.resize(100, 40);

    let pole = site.pole().expect("pole built after growing");
    assert_eq!(pole.frame().width, site.layout().pole_pixels().0);
}

#[test]
fn resize_before_start_leaves_pole_to_start() {
    let mut site = site();
    site.resize(100, 40);
    assert!(site.pole().is_none());
}

#[tokio::test]
async fn booking_with_any_empty_field_is_not_sent() {
    for field in [FIELD_NAME, FIELD_EMAIL, FIELD_PHONE, FIELD_DATETIME, FIELD_SERVICE] {
        let mut site = site();
        fill_booking(&mut site);
        site.booking_form_mut().set(field, "");

        let commands = site.submit_booking();
        let api = MockApi::default();
        pump(&mut site, &api, commands).await;

        assert!(api.calls().is_empty(), "{field} empty but a request was sent");
        assert_eq!(site.alert(), Some(messages::FILL_ALL_FIELDS), "{field}");
        assert!(!site.submit_button().is_disabled(), "{field}");
        assert_eq!(site.submit_button().label(), booking::SUBMIT_LABEL, "{field}");
    }
}

#[tokio::test]
async fn whitespace_only_field_is_still_sent() {
    let mut site = site();
    fill_booking(&mut site);
    site.booking_form_mut().set(FIELD_NAME, " ");

    let commands = site.submit_booking();
    let api = MockApi {
        booking: Some(BookingResponse {
            message: Some("Booked!".to_string()),
        }),
        ..MockApi::default()
    };
    pump(&mut site, &api, commands).await;

    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    let Call::Book(sent) = &calls[0] else {
        panic!("expected a booking, got {calls:?}");
    };
    assert_eq!(sent.name, " ");
}

#[tokio::test]
async fn booked_reply_is_shown_and_button_restored() {
    let mut site = site();
    fill_booking(&mut site);
    let commands = site.submit_booking();

    let api = MockApi {
        booking: Some(BookingResponse {
            message: Some("Booked!".to_string()),
        }),
        ..MockApi::default()
    };
    pump(&mut site, &api, commands).await;

    assert_eq!(site.alert(), Some("Booked!"));
    assert_eq!(site.submit_button().label(), "Book Appointment");
    assert!(!site.submit_button().is_disabled());
}

#[tokio::test]
async fn booking_disables_submit_until_answered() {
    let mut site = site();
    fill_booking(&mut site);

    let commands = site.submit_booking();
    assert_eq!(site.submit_button().label(), booking::BUSY_LABEL);
    assert!(site.submit_button().is_disabled());
    // A second submit while in flight does nothing
    assert!(site.submit_booking().is_empty());

    let api = MockApi {
        booking: Some(BookingResponse {
            message: Some("Appointment booked!".to_string()),
        }),
        ..MockApi::default()
    };
    pump(&mut site, &api, commands).await;

    assert_eq!(site.alert(), Some("Appointment booked!"));
    assert_eq!(site.submit_button().label(), booking::SUBMIT_LABEL);
    assert!(!site.submit_button().is_disabled());
    assert_eq!(
        api.calls(),
        vec![Call::Book(Appointment {
            name: "Sam Carter".to_string(),
            email: "sam@example.com".to_string(),
            phone: "555-0100".to_string(),
            datetime: "2024-05-01T14:30".to_string(),
            service: "Haircut".to_string(),
        })]
    );
}

#[tokio::test]
async fn booking_failure_alerts_and_reenables_submit() {
    let mut site = site();
    fill_booking(&mut site);
    let commands = site.submit_booking();

    pump(&mut site, &MockApi::default(), commands).await;

    assert_eq!(site.alert(), Some(messages::BOOKING_FAILED));
    assert_eq!(site.submit_button().label(), booking::SUBMIT_LABEL);
    assert!(!site.submit_button().is_disabled());
}

#[tokio::test]
async fn booking_reply_without_message_counts_as_failure() {
    let mut site = site();
    fill_booking(&mut site);
    let commands = site.submit_booking();

    let api = MockApi {
        booking: Some(BookingResponse::default()),
        ..MockApi::default()
    };
    pump(&mut site, &api, commands).await;

    assert_eq!(site.alert(), Some(messages::BOOKING_FAILED));
}

#[test]
fn loader_blocks_input_then_starts_entrance_animations() {
    let mut site = site();
    site.resize(100, 40);

    assert!(site.loader().is_loading());
    assert!(site.hero().title.opacity() >= 1.0);
    press(&mut site, KeyCode::Char('4'));
    site.tick(Duration::from_secs(1));
    assert!(site.scroll_offset().abs() < f32::EPSILON);

    finish_loading(&mut site);
    assert!(site.loader().progress() >= 100.0);

    settle(&mut site);
    assert!(site.hero().title.is_settled());
    assert!(site.hero().cta.is_settled());
    assert_eq!(site.hero().text.rows_down(), 0);
}

#[test]
fn services_reveal_when_scrolled_into_view() {
    let mut site = ready_site();
    settle(&mut site);

    let services = site.scroll_reveal(Section::Services).unwrap();
    assert!(!services.trigger.is_active());
    assert!(services.items.iter().all(|r| r.opacity() < f32::EPSILON));

    site.navigate(Section::Services.anchor());
    settle(&mut site);

    let expected = f32::from(site.layout().top(Section::Services));
    assert!((site.scroll_offset() - expected).abs() < f32::EPSILON);
    let services = site.scroll_reveal(Section::Services).unwrap();
    assert!(services.trigger.is_active());
    assert!(services.items.iter().all(|r| r.is_settled()));

    // Back to the top reverses the reveal
    press(&mut site, KeyCode::Home);
    settle(&mut site);
    let services = site.scroll_reveal(Section::Services).unwrap();
    assert!(!services.trigger.is_active());
    assert!(services.items.iter().all(|r| r.opacity() < f32::EPSILON));
}

#[test]
fn number_keys_and_nav_clicks_glide_to_sections() {
    let mut site = ready_site();

    // Sections near the end stop where the page bottoms out
    press(&mut site, KeyCode::Char('4'));
    settle(&mut site);
    let layout = site.layout();
    let book = layout.top(Section::Book).min(layout.max_scroll());
    assert!((site.scroll_offset() - f32::from(book)).abs() < 0.5);
    assert!(site.scroll_offset() > f32::from(layout.top(Section::About)));

    let (section, start, _) = layout::nav_links(100)[0];
    assert_eq!(section, Section::Services);
    site.handle_mouse(MouseEvent {
        kind: MouseEventKind::Down(crossterm::event::MouseButton::Left),
        column: start,
        row: 0,
        modifiers: KeyModifiers::NONE,
    });
    settle(&mut site);
    assert!(
        (site.scroll_offset() - f32::from(site.layout().top(Section::Services))).abs() < 0.5
    );
}

#[test]
fn wheel_over_hero_scrolls_the_page() {
    let mut site = site();
    site.resize(100, 40);
    site.start();
    finish_loading(&mut site);
    let distance = site.pole().unwrap().camera().position.z;

    site.handle_mouse(MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column: 90,
        row: 5,
        modifiers: KeyModifiers::NONE,
    });

    assert!(site.scroll_offset() > 0.0);
    assert!((site.pole().unwrap().camera().position.z - distance).abs() < f32::EPSILON);
}

#[tokio::test]
async fn keyboard_booking_round_trip() {
    let mut site = ready_site();

    press(&mut site, KeyCode::Enter);
    assert_eq!(site.focus(), Focus::Booking);

    type_text(&mut site, "Quinn");
    press(&mut site, KeyCode::Tab);
    type_text(&mut site, "quinn@example.com");
    press(&mut site, KeyCode::Tab);
    type_text(&mut site, "555-0199");
    press(&mut site, KeyCode::Tab);
    type_text(&mut site, "2024-06-02T09:00");
    press(&mut site, KeyCode::Tab);
    press(&mut site, KeyCode::Right);

    assert_eq!(site.booking_form().value(FIELD_SERVICE), booking::SERVICES[0]);
    assert!(!site.should_quit(), "typing 'q' in a field must not quit");

    let commands = press(&mut site, KeyCode::Enter);
    assert_eq!(commands.len(), 1);
    let Command::BookAppointment(appointment) = &commands[0] else {
        panic!("expected a booking request, got {commands:?}");
    };
    assert_eq!(appointment.name, "Quinn");
    assert_eq!(appointment.datetime, "2024-06-02T09:00");

    let api = MockApi {
        booking: Some(BookingResponse {
            message: Some("See you soon".to_string()),
        }),
        ..MockApi::default()
    };
    pump(&mut site, &api, commands).await;
    assert_eq!(site.alert(), Some("See you soon"));

    // The alert swallows keys until dismissed
    press(&mut site, KeyCode::Char('x'));
    assert_eq!(site.booking_form().value(FIELD_NAME), "Quinn");
    press(&mut site, KeyCode::Enter);
    assert!(site.alert().is_none());

    press(&mut site, KeyCode::Esc);
    assert_eq!(site.focus(), Focus::Page);
    press(&mut site, KeyCode::Char('q'));
    assert!(site.should_quit());
}

#[tokio::test]
async fn page_renders_sections_and_overlays() {
    let mut site = site();
    site.resize(100, 40);
    let commands = site.start();
    let api = MockApi {
        gallery: Some(vec![gallery_item("1", "Classic taper")]),
        ..MockApi::default()
    };
    pump(&mut site, &api, commands).await;

    let loading = render(&mut site, 100, 40);
    assert!(loading.contains("Gold Standard Barbers"));
    assert!(!loading.contains("Book Now"));

    finish_loading(&mut site);
    settle(&mut site);
    let hero = render(&mut site, 100, 40);
    assert!(hero.contains("Gold Standard Barbers"));
    assert!(hero.contains("Book Now"));

    site.navigate(Section::Gallery.anchor());
    settle(&mut site);
    let gallery = render(&mut site, 100, 40);
    assert!(gallery.contains("Classic taper"));

    site.navigate(Section::Book.anchor());
    settle(&mut site);
    fill_booking(&mut site);
    site.submit_booking();
    let booking = render(&mut site, 100, 40);
    assert!(booking.contains(booking::BUSY_LABEL));
}
