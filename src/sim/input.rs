//! Keyboard actions
//!
//! Raw key codes map onto eleven logical [`Action`]s. [`InputState`] tracks
//! which are held and latches a one-frame "pressed" pulse on each fresh key
//! down, so mode toggles fire once per press even if the key is held.

use super::state::SimulationState;

/// Logical game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Up,
    Right,
    Down,
    Fire,
    Bomb,
    SpeedUp,
    SpeedDown,
    /// Held space suppresses every other action (and stops the page scrolling)
    SpaceBar,
    BuggerMode,
    ClearEnemies,
}

impl Action {
    pub const COUNT: usize = 11;

    pub const ALL: [Action; Action::COUNT] = [
        Action::Left,
        Action::Up,
        Action::Right,
        Action::Down,
        Action::Fire,
        Action::Bomb,
        Action::SpeedUp,
        Action::SpeedDown,
        Action::SpaceBar,
        Action::BuggerMode,
        Action::ClearEnemies,
    ];

    /// Browser `keyCode` bound to this action
    pub fn key_code(&self) -> u32 {
        match self {
            Action::Left => 37,
            Action::Up => 38,
            Action::Right => 39,
            Action::Down => 40,
            Action::Fire => 88,         // X
            Action::Bomb => 67,         // C
            Action::SpeedUp => 34,      // Page Down
            Action::SpeedDown => 33,    // Page Up
            Action::SpaceBar => 32,
            Action::BuggerMode => 49,   // 1
            Action::ClearEnemies => 48, // 0
        }
    }

    pub fn from_key_code(code: u32) -> Option<Action> {
        Action::ALL.into_iter().find(|a| a.key_code() == code)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// One flag per action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionSet([bool; Action::COUNT]);

impl ActionSet {
    pub fn contains(&self, action: Action) -> bool {
        self.0[action.index()]
    }

    pub fn set(&mut self, action: Action, on: bool) {
        self.0[action.index()] = on;
    }
}

/// What the dispatcher sees for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    /// Keys down right now
    pub held: ActionSet,
    /// Keys that went down since the previous frame
    pub pressed: ActionSet,
}

impl InputFrame {
    /// Frame where `actions` are both held and freshly pressed
    pub fn pressing(actions: &[Action]) -> Self {
        let mut frame = Self::default();
        for &action in actions {
            frame.held.set(action, true);
            frame.pressed.set(action, true);
        }
        frame
    }

    /// Frame where `actions` are held but were already down last frame
    pub fn holding(actions: &[Action]) -> Self {
        let mut frame = Self::default();
        for &action in actions {
            frame.held.set(action, true);
        }
        frame
    }
}

/// Keyboard state fed by key events between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: ActionSet,
    pressed: ActionSet,
}

impl InputState {
    /// Record a key down. Returns whether the key is bound to an action.
    pub fn key_down(&mut self, code: u32) -> bool {
        let Some(action) = Action::from_key_code(code) else {
            return false;
        };
        // Auto-repeat arrives as more key downs while held
        if !self.held.contains(action) {
            self.pressed.set(action, true);
        }
        self.held.set(action, true);
        true
    }

    /// Record a key up. Returns whether the key is bound to an action.
    pub fn key_up(&mut self, code: u32) -> bool {
        let Some(action) = Action::from_key_code(code) else {
            return false;
        };
        self.held.set(action, false);
        true
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(action)
    }

    /// Snapshot for the coming tick; clears pressed pulses
    pub fn take_frame(&mut self) -> InputFrame {
        let frame = InputFrame {
            held: self.held,
            pressed: self.pressed,
        };
        self.pressed = ActionSet::default();
        frame
    }

    /// Forget everything (e.g. window lost focus and key ups will never arrive)
    pub fn release_all(&mut self) {
        self.held = ActionSet::default();
        self.pressed = ActionSet::default();
    }
}

/// Apply one frame of input to the simulation, in fixed order
pub fn apply_actions(state: &mut SimulationState, input: &InputFrame) {
    let held = &input.held;
    if held.contains(Action::SpaceBar) {
        return;
    }

    let canvas = state.viewport;
    let bg_height = state.background.height();
    let player = &mut state.player;
    let half = player.size / 2.0;

    if held.contains(Action::Up) && player.pos.y > half.y {
        player.move_up();
    }
    if held.contains(Action::Down) && player.pos.y < canvas.y - half.y && player.pos.y < bg_height
    {
        player.move_down();
    }
    if held.contains(Action::Left) && player.pos.x > half.x {
        player.move_left();
    }
    if held.contains(Action::Right) && player.pos.x < canvas.x - half.x {
        player.move_right();
    }

    if held.contains(Action::Fire) {
        state.fire();
    }

    if held.contains(Action::Bomb) {
        state.throw_bomb();
    }

    let tuning = &state.tuning;
    if held.contains(Action::SpeedUp) && state.bg_speed < tuning.bg_speed_max {
        state.bg_speed = (state.bg_speed + tuning.bg_speed_step).min(tuning.bg_speed_max);
    }
    if held.contains(Action::SpeedDown) && state.bg_speed > tuning.bg_speed_min {
        state.bg_speed = (state.bg_speed - tuning.bg_speed_step).max(tuning.bg_speed_min);
    }

    if input.pressed.contains(Action::BuggerMode) && !state.bugger_mode {
        state.enable_bugger_mode();
    }

    if input.pressed.contains(Action::ClearEnemies) && state.bugger_mode {
        state.disable_bugger_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Sprite;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn state() -> SimulationState {
        let mut state = SimulationState::new(Tuning::default(), Vec2::new(800.0, 600.0), 11);
        state.on_sprite_loaded(Sprite::Background1, 1600.0, 500.0);
        state.player.pos = Vec2::new(400.0, 300.0);
        state
    }

    #[test]
    fn test_key_table_is_complete_and_unique() {
        let mut codes: Vec<u32> = Action::ALL.iter().map(Action::key_code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), Action::COUNT);
        assert_eq!(Action::from_key_code(88), Some(Action::Fire));
        assert_eq!(Action::from_key_code(67), Some(Action::Bomb));
        assert_eq!(Action::from_key_code(65), None);
    }

    #[test]
    fn test_unmapped_keys_not_handled() {
        let mut input = InputState::default();
        assert!(!input.key_down(65));
        assert!(!input.key_up(65));
        assert!(input.key_down(38));
        assert!(input.is_held(Action::Up));
    }

    #[test]
    fn test_pressed_pulse_once_per_press() {
        let mut input = InputState::default();
        input.key_down(49);
        input.key_down(49); // auto-repeat
        let frame = input.take_frame();
        assert!(frame.pressed.contains(Action::BuggerMode));
        assert!(frame.held.contains(Action::BuggerMode));

        input.key_down(49);
        let frame = input.take_frame();
        assert!(!frame.pressed.contains(Action::BuggerMode));
        assert!(frame.held.contains(Action::BuggerMode));

        input.key_up(49);
        input.key_down(49);
        assert!(input.take_frame().pressed.contains(Action::BuggerMode));
    }

    #[test]
    fn test_tap_between_frames_still_pulses() {
        let mut input = InputState::default();
        input.key_down(48);
        input.key_up(48);
        let frame = input.take_frame();
        assert!(frame.pressed.contains(Action::ClearEnemies));
        assert!(!frame.held.contains(Action::ClearEnemies));
    }

    #[test]
    fn test_space_suppresses_everything() {
        let mut state = state();
        let before = state.player.pos;
        let frame = InputFrame::pressing(&[
            Action::SpaceBar,
            Action::Up,
            Action::Fire,
            Action::Bomb,
            Action::BuggerMode,
            Action::SpeedUp,
        ]);
        apply_actions(&mut state, &frame);
        assert_eq!(state.player.pos, before);
        assert!(state.shots.is_empty());
        assert!(!state.player.bombing);
        assert!(!state.bugger_mode);
        assert_eq!(state.bg_speed, 10.0);
    }

    #[test]
    fn test_movement_guards() {
        let mut state = state();
        state.player.pos = Vec2::new(32.0, 20.0);
        apply_actions(&mut state, &InputFrame::holding(&[Action::Up, Action::Left]));
        // Half ship is 32 x 20, so neither move is allowed
        assert_eq!(state.player.pos, Vec2::new(32.0, 20.0));

        state.player.pos = Vec2::new(33.0, 21.0);
        apply_actions(&mut state, &InputFrame::holding(&[Action::Up, Action::Left]));
        assert_eq!(state.player.pos, Vec2::new(30.0, 18.0));
    }

    #[test]
    fn test_down_stops_at_background_bottom() {
        let mut state = state();
        state.player.pos = Vec2::new(400.0, 500.0);
        apply_actions(&mut state, &InputFrame::holding(&[Action::Down]));
        assert_eq!(state.player.pos.y, 500.0);

        state.player.pos = Vec2::new(768.0, 499.0);
        apply_actions(&mut state, &InputFrame::holding(&[Action::Down, Action::Right]));
        assert_eq!(state.player.pos, Vec2::new(768.0, 502.0));
    }

    #[test]
    fn test_bg_speed_stays_in_range() {
        let mut state = state();
        let up = InputFrame::holding(&[Action::SpeedUp]);
        for _ in 0..50 {
            apply_actions(&mut state, &up);
            assert!(state.bg_speed <= 30.0);
        }
        assert_eq!(state.bg_speed, 30.0);

        let down = InputFrame::holding(&[Action::SpeedDown]);
        for _ in 0..50 {
            apply_actions(&mut state, &down);
            assert!(state.bg_speed >= 10.0);
        }
        assert_eq!(state.bg_speed, 10.0);
    }

    #[test]
    fn test_bugger_mode_needs_fresh_press() {
        let mut state = state();
        apply_actions(&mut state, &InputFrame::holding(&[Action::BuggerMode]));
        assert!(!state.bugger_mode);

        apply_actions(&mut state, &InputFrame::pressing(&[Action::BuggerMode]));
        assert!(state.bugger_mode);
        assert_eq!(state.buggers.len(), 20);
    }

    #[test]
    fn test_toggle_on_then_off_same_tick() {
        let mut state = state();
        let frame = InputFrame::pressing(&[Action::BuggerMode, Action::ClearEnemies]);
        apply_actions(&mut state, &frame);
        assert!(!state.bugger_mode);
        assert!(state.buggers.is_empty());
    }

    #[test]
    fn test_fire_held_fires_once_per_tick() {
        let mut state = state();
        let frame = InputFrame::holding(&[Action::Fire]);
        apply_actions(&mut state, &frame);
        apply_actions(&mut state, &frame);
        assert_eq!(state.shots.len(), 1);
    }
}
