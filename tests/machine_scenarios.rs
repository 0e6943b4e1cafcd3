//! End-to-end spins driven through the public controller

use reel_spin::consts::SIM_DT;
use reel_spin::sim::{GameEvent, MachinePhase, Reel, SpinOutcome, SymbolKind, check_win};
use reel_spin::ui::{ButtonState, SpinCommand};
use reel_spin::{ForcedOutcome, Settings, SettingsError, SlotMachine};

fn quick_settings() -> Settings {
    Settings {
        spin_speed_range: [20.0, 30.0],
        deceleration_range: [1.0, 1.5],
        auto_stop_secs: 0.2,
        align_duration_secs: 0.1,
        ..Settings::default()
    }
}

/// Press spin and run until the button is usable again
fn spin_to_rest(machine: &mut SlotMachine) -> Vec<GameEvent> {
    assert_eq!(machine.press_spin(), Some(SpinCommand::Start));
    for _ in 0..2000 {
        machine.update(SIM_DT);
        if machine.phase() == MachinePhase::Idle && machine.button.state == ButtonState::Idle {
            return machine.drain_events();
        }
    }
    panic!("spin never came to rest");
}

fn outcomes(events: &[GameEvent]) -> Vec<&SpinOutcome> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::SpinResolved(outcome) => Some(outcome),
            _ => None,
        })
        .collect()
}

#[test]
fn identical_reels_always_win() {
    let settings = Settings {
        strip: vec![SymbolKind::Wild; 4],
        ..quick_settings()
    };
    let mut machine = SlotMachine::new(settings, 8);

    let events = spin_to_rest(&mut machine);
    let resolved = outcomes(&events);
    assert_eq!(resolved.len(), 1);
    assert!(resolved[0].win);
    assert!(!resolved[0].forced);
    assert_eq!(resolved[0].line, vec![Some(SymbolKind::Wild); 3]);
    assert_eq!(machine.presentations, 1);
    assert!(machine.win_animation.is_some());

    // Play the celebration out; the controller drops it when done
    let settings = machine.settings();
    let playback = settings.win_frames as f32 / settings.win_fps;
    let frames = (playback / SIM_DT).ceil() as usize + 2;
    for _ in 0..frames {
        machine.update(SIM_DT);
    }
    assert!(machine.win_animation.is_none());
    assert_eq!(machine.presentations, 1);
    assert!(outcomes(&machine.drain_events()).is_empty());
}

#[test]
fn offset_snap_still_lands_on_the_line() {
    let settings = Settings {
        strip: vec![SymbolKind::Wild; 9],
        align_offset: 100.0,
        ..quick_settings()
    };
    assert!(settings.validate().is_ok());
    let mut machine = SlotMachine::new(settings, 8);

    let events = spin_to_rest(&mut machine);
    let resolved = outcomes(&events);
    assert!(resolved[0].win);
    assert_eq!(resolved[0].line, vec![Some(SymbolKind::Wild); 3]);
}

#[test]
fn offset_past_the_line_tolerance_is_rejected() {
    let settings = Settings {
        strip: vec![SymbolKind::Wild; 9],
        align_offset: 120.0,
        ..quick_settings()
    };
    assert!(matches!(
        settings.validate(),
        Err(SettingsError::AlignOffsetTooLarge { .. })
    ));
}

#[test]
fn one_odd_reel_loses() {
    let settings = Settings {
        strip: vec![SymbolKind::Wild; 9],
        ..quick_settings()
    };
    let mut machine = SlotMachine::new(settings, 8);
    let geometry = machine.state.geometry;
    machine.state.reels[1] = Reel::build(1, &[SymbolKind::High1; 9], 100, &geometry);

    let events = spin_to_rest(&mut machine);
    let resolved = outcomes(&events);
    assert_eq!(resolved.len(), 1);
    assert!(!resolved[0].win);
    assert_eq!(
        resolved[0].line,
        vec![
            Some(SymbolKind::Wild),
            Some(SymbolKind::High1),
            Some(SymbolKind::Wild)
        ]
    );
    assert_eq!(machine.presentations, 0);
    assert!(machine.win_animation.is_none());
}

#[test]
fn forced_win_overrides_the_line() {
    let settings = Settings {
        forced_outcome: ForcedOutcome::Win,
        ..quick_settings()
    };
    let mut machine = SlotMachine::new(settings, 3);

    let events = spin_to_rest(&mut machine);
    let resolved = outcomes(&events);
    assert!(resolved[0].win);
    assert!(resolved[0].forced);
    assert_eq!(machine.presentations, 1);
}

#[test]
fn forced_lose_suppresses_a_real_win() {
    let settings = Settings {
        strip: vec![SymbolKind::Low2; 3],
        forced_outcome: ForcedOutcome::Lose,
        ..quick_settings()
    };
    let mut machine = SlotMachine::new(settings, 3);

    let events = spin_to_rest(&mut machine);
    assert!(!outcomes(&events)[0].win);
    assert_eq!(machine.presentations, 0);
}

#[test]
fn spin_request_while_spinning_is_ignored() {
    let mut machine = SlotMachine::new(quick_settings(), 5);
    machine.press_spin();
    machine.update(SIM_DT);
    assert_eq!(machine.phase(), MachinePhase::Spinning);

    let speeds: Vec<f32> = machine
        .state
        .reels
        .iter()
        .map(|r| r.settings.spin_speed)
        .collect();
    // Straight to the simulation, bypassing the button
    assert!(!reel_spin::sim::start_spinning(&mut machine.state));
    assert_eq!(machine.state.session.number, 1);
    let after: Vec<f32> = machine
        .state
        .reels
        .iter()
        .map(|r| r.settings.spin_speed)
        .collect();
    assert_eq!(speeds, after);
}

#[test]
fn evaluation_runs_once_per_spin() {
    let mut machine = SlotMachine::new(quick_settings(), 13);
    let events = spin_to_rest(&mut machine);
    assert_eq!(outcomes(&events).len(), 1);

    // Repeated checks after resolution report nothing new
    assert!(check_win(&mut machine.state).is_none());
    assert!(check_win(&mut machine.state).is_none());
    assert!(machine.state.drain_events().is_empty());
}

#[test]
fn consecutive_spins_get_fresh_sessions() {
    let mut machine = SlotMachine::new(quick_settings(), 77);
    for expected in 1..=3 {
        let events = spin_to_rest(&mut machine);
        assert_eq!(events.first(), Some(&GameEvent::SpinStarted { session: expected }));
        assert_eq!(outcomes(&events)[0].session, expected);
    }
}
