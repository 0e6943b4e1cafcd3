//! Fixed timestep simulation tick
//!
//! Spin commands, reel physics, alignment and evaluation all advance here,
//! once per simulation step.

use super::align::Alignment;
use super::evaluate::check_win;
use super::state::{GameEvent, MachinePhase, MachineState};
use crate::consts::FRAME_RATE;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start a spin
    pub start: bool,
    /// Stop the current spin
    pub stop: bool,
}

/// Begin a spin. Returns false (no-op) unless the machine is idle.
pub fn start_spinning(state: &mut MachineState) -> bool {
    if state.phase != MachinePhase::Idle {
        log::debug!("Spin rejected: machine is {:?}", state.phase);
        return false;
    }

    state.session.begin();
    for i in 0..state.reels.len() {
        let settings = state.draw_reel_settings();
        state.reels[i].start(settings);
    }
    state.phase = MachinePhase::Spinning;
    state.events.push(GameEvent::SpinStarted {
        session: state.session.number,
    });
    log::info!("Spin {} started", state.session.number);
    true
}

/// Request every reel to stop. Returns false (no-op) if not spinning or
/// already stopping.
pub fn stop_spinning(state: &mut MachineState) -> bool {
    if state.phase != MachinePhase::Spinning {
        return false;
    }

    let geometry = state.geometry;
    let mut changed = false;
    for reel in &mut state.reels {
        changed |= reel.request_stop(&geometry);
    }
    if changed {
        state.events.push(GameEvent::StopRequested);
        log::info!("Stop requested for spin {}", state.session.number);
    }
    changed
}

/// Advance the machine by one fixed timestep
pub fn tick(state: &mut MachineState, input: &TickInput, dt: f32) {
    if input.start {
        start_spinning(state);
    }
    if input.stop {
        stop_spinning(state);
    }

    state.time_ticks += 1;

    match state.phase {
        MachinePhase::Idle => {}

        MachinePhase::Spinning => {
            // Velocities are tuned in units per 60 Hz frame
            let delta = dt * FRAME_RATE;
            let geometry = state.geometry;
            for reel in &mut state.reels {
                reel.integrate(delta, &geometry);
            }

            if state.all_reels_stopped() {
                state.session.spinning = false;
                state.events.push(GameEvent::ReelsStopped);
                log::info!("Reels stopped, aligning to pay-line");

                state.alignment = Some(Alignment::begin(
                    &state.reels,
                    &state.geometry,
                    state.settings.align_duration_secs,
                ));
                state.phase = MachinePhase::Aligning;
            }
        }

        MachinePhase::Aligning => {
            let pitch = state.geometry.pitch();
            let Some(alignment) = state.alignment.as_mut() else {
                log::warn!("Aligning without an alignment in progress");
                state.phase = MachinePhase::Idle;
                return;
            };

            for reel in alignment.step(&mut state.reels, dt, pitch) {
                state.events.push(GameEvent::ReelAligned { reel });
            }

            if alignment.is_complete() {
                state.alignment = None;
                state.phase = MachinePhase::Idle;
                check_win(state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::Settings;

    fn fast_settings() -> Settings {
        Settings {
            spin_speed_range: [30.0, 60.0],
            deceleration_range: [1.0, 2.0],
            ..Settings::default()
        }
    }

    fn run_until_idle(state: &mut MachineState, max_ticks: usize) {
        for _ in 0..max_ticks {
            tick(state, &TickInput::default(), SIM_DT);
            if state.phase == MachinePhase::Idle {
                return;
            }
        }
        panic!("machine did not settle in {} ticks", max_ticks);
    }

    #[test]
    fn test_start_assigns_reel_speeds() {
        let mut state = MachineState::new(Settings::default(), 3);
        assert!(start_spinning(&mut state));
        assert_eq!(state.phase, MachinePhase::Spinning);
        for reel in &state.reels {
            assert!(!reel.stop_requested);
            assert!(
                reel.symbols
                    .iter()
                    .all(|s| s.vy == reel.settings.spin_speed)
            );
        }
    }

    #[test]
    fn test_spin_while_spinning_is_rejected() {
        let mut state = MachineState::new(Settings::default(), 3);
        assert!(start_spinning(&mut state));
        let speeds: Vec<f32> = state.reels.iter().map(|r| r.settings.spin_speed).collect();
        tick(&mut state, &TickInput::default(), SIM_DT);

        assert!(!start_spinning(&mut state));
        assert_eq!(state.session.number, 1);
        let after: Vec<f32> = state.reels.iter().map(|r| r.settings.spin_speed).collect();
        assert_eq!(speeds, after);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut state = MachineState::new(Settings::default(), 3);
        assert!(!stop_spinning(&mut state));
        start_spinning(&mut state);
        assert!(stop_spinning(&mut state));
        assert!(!stop_spinning(&mut state));
        let stops = state
            .events
            .iter()
            .filter(|e| **e == GameEvent::StopRequested)
            .count();
        assert_eq!(stops, 1);
    }

    #[test]
    fn test_reels_keep_moving_until_stop_requested() {
        let mut state = MachineState::new(fast_settings(), 5);
        start_spinning(&mut state);
        for _ in 0..200 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        // Velocity is gone but nobody asked to stop
        assert!(state.reels.iter().all(|r| !r.is_moving()));
        assert_eq!(state.phase, MachinePhase::Spinning);

        let input = TickInput {
            stop: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, MachinePhase::Aligning);
    }

    #[test]
    fn test_full_cycle_resolves_once_on_the_line() {
        let mut state = MachineState::new(fast_settings(), 11);
        let input = TickInput {
            start: true,
            stop: true,
        };
        tick(&mut state, &input, SIM_DT);
        run_until_idle(&mut state, 2000);

        let events = state.drain_events();
        assert_eq!(events.first(), Some(&GameEvent::SpinStarted { session: 1 }));
        assert!(events.contains(&GameEvent::ReelsStopped));
        for reel in 0..3 {
            assert!(events.contains(&GameEvent::ReelAligned { reel }));
        }
        let outcomes: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::SpinResolved(outcome) => Some(outcome),
                _ => None,
            })
            .collect();
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].line.iter().all(Option::is_some));

        // Every reel ends with a symbol centred on the pay-line
        let geometry = state.geometry;
        for reel in &state.reels {
            let on_line = reel
                .symbol_on_line(geometry.pay_line, geometry.symbol_size)
                .unwrap();
            assert!((on_line.center(geometry.symbol_size) - geometry.pay_line).abs() < 0.01);
        }
    }

    #[test]
    fn test_determinism() {
        let mut a = MachineState::new(fast_settings(), 99999);
        let mut b = MachineState::new(fast_settings(), 99999);
        let input = TickInput {
            start: true,
            stop: true,
        };
        tick(&mut a, &input, SIM_DT);
        tick(&mut b, &input, SIM_DT);
        run_until_idle(&mut a, 2000);
        run_until_idle(&mut b, 2000);

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.line_symbols(), b.line_symbols());
    }
}
