//! Prompt selection driven by live mode detection.

use glam::Vec2;
use modesense_input::{
    GamepadInput, GamepadKey, InputMode, InputModeSubsystem, InputModeTracker, Key, KeyCode,
    MouseAxis, MouseButton, TrackerConfig,
};
use modesense_prompts::{
    BindingPreferenceResolver, DevicePreference, DeviceToken, ImageTheme, InputBinding,
    InputBindings, InputPrompts, MappingSource, PreferenceOrder,
};

fn bindings() -> InputBindings {
    InputBindings::builder()
        .action("jump", KeyCode::Space)
        .action("jump", GamepadKey::FaceButtonBottom)
        .action("interact", KeyCode::KeyE)
        .action("interact", MouseButton::Right)
        .action("interact", GamepadKey::FaceButtonLeft)
        .axis("look_x", MouseAxis::X, 1.0)
        .axis("look_x", KeyCode::ArrowRight, 1.0)
        .axis("look_x", GamepadKey::RightX, 1.0)
        .build()
}

fn theme() -> ImageTheme<String> {
    let mut theme = ImageTheme::new("default");
    for key in [
        Key::Keyboard(KeyCode::Space),
        Key::Keyboard(KeyCode::KeyE),
        Key::Mouse(MouseButton::Right),
        Key::MouseAxis(MouseAxis::X),
        Key::Gamepad(GamepadKey::FaceButtonBottom),
        Key::Gamepad(GamepadKey::FaceButtonLeft),
        Key::Gamepad(GamepadKey::RightX),
    ] {
        theme.insert(key, format!("{key}.png"));
    }
    theme
}

#[test]
fn prompts_follow_the_last_device() {
    let prompts = InputPrompts::new(bindings()).with_default_theme(theme());
    let mut tracker = InputModeTracker::default();
    let jump = InputBinding::action("jump");
    let interact = InputBinding::action("interact");

    // Fresh player: mouse general mode, keyboard button mode.
    assert_eq!(
        prompts.key_for(&jump, DevicePreference::Auto, 0, &tracker),
        Some(Key::Keyboard(KeyCode::Space))
    );

    tracker.handle_key_down(0, Key::Gamepad(GamepadKey::FaceButtonBottom));
    assert_eq!(
        prompts.image_for(&jump, DevicePreference::Auto, 0, &tracker, None),
        Some(&"Gamepad_FaceButton_Bottom.png".to_string())
    );

    // A right click switches interact prompts to the mouse button.
    tracker.handle_mouse_button_down(0);
    assert_eq!(tracker.last_mode(0), InputMode::Mouse);
    assert_eq!(
        prompts.key_for(&interact, DevicePreference::Auto, 0, &tracker),
        Some(Key::Mouse(MouseButton::Right))
    );
    // With a fixed keyboard-first preference the key wins instead.
    assert_eq!(
        prompts.key_for(&interact, DevicePreference::GamepadKeyboardMouse, 0, &tracker),
        Some(Key::Keyboard(KeyCode::KeyE))
    );

    tracker.handle_key_down(0, Key::Keyboard(KeyCode::KeyE));
    assert_eq!(
        prompts.key_for(&interact, DevicePreference::Auto, 0, &tracker),
        Some(Key::Keyboard(KeyCode::KeyE))
    );
}

#[test]
fn mouse_motion_after_gamepad_press_shows_keyboard_prompt() {
    let prompts = InputPrompts::new(bindings()).with_default_theme(theme());
    let mut tracker = InputModeTracker::default();
    let jump = InputBinding::action("jump");

    tracker.handle_key_down(0, Key::Gamepad(GamepadKey::FaceButtonBottom));
    tracker.handle_mouse_move(0, Vec2::new(50.0, 0.0), Vec2::ZERO);
    assert_eq!(tracker.last_mode(0), InputMode::Mouse);
    assert_eq!(tracker.last_button_mode(0), InputMode::Gamepad);

    assert_eq!(
        prompts.key_for_action("jump", DevicePreference::Auto, 0, &tracker),
        Some(Key::Keyboard(KeyCode::Space))
    );
    assert_eq!(
        prompts.image_for(&jump, DevicePreference::Auto, 0, &tracker, None),
        Some(&"Space.png".to_string())
    );
}

#[test]
fn axes_ignore_stick_noise() {
    let prompts = InputPrompts::new(bindings()).with_default_theme(theme());
    let mut tracker = InputModeTracker::default();
    let look = InputBinding::axis("look_x");

    tracker.handle_analog_input(0, Key::Gamepad(GamepadKey::RightX), 0.1);
    assert_eq!(
        prompts.key_for(&look, DevicePreference::Auto, 0, &tracker),
        Some(Key::MouseAxis(MouseAxis::X))
    );

    tracker.handle_analog_input(0, Key::Gamepad(GamepadKey::RightX), -0.8);
    assert_eq!(
        prompts.key_for(&look, DevicePreference::Auto, 0, &tracker),
        Some(Key::Gamepad(GamepadKey::RightX))
    );

    // Sub-threshold cursor jitter keeps the gamepad prompt.
    tracker.handle_mouse_move(0, Vec2::new(100.5, 100.0), Vec2::new(100.0, 100.0));
    assert!(tracker.last_input_was_gamepad(0));

    tracker.handle_mouse_move(0, Vec2::new(110.0, 100.0), Vec2::new(100.0, 100.0));
    assert_eq!(
        prompts.key_for(&look, DevicePreference::Auto, 0, &tracker),
        Some(Key::MouseAxis(MouseAxis::X))
    );
}

#[test]
fn players_resolve_independently() {
    let prompts: InputPrompts<_, String> = InputPrompts::new(bindings());
    let mut subsystem =
        InputModeSubsystem::new(TrackerConfig::default(), Default::default()).unwrap();
    let jump = InputBinding::action("jump");

    subsystem.process_gamepad_input(1, GamepadInput::ButtonDown(GamepadKey::Start));

    assert_eq!(
        prompts.key_for(&jump, DevicePreference::Auto, 1, subsystem.tracker()),
        Some(Key::Gamepad(GamepadKey::FaceButtonBottom))
    );
    assert_eq!(
        prompts.key_for(&jump, DevicePreference::Auto, 0, subsystem.tracker()),
        Some(Key::Keyboard(KeyCode::Space))
    );
    // No theme at all.
    assert_eq!(
        prompts.image_for(&jump, DevicePreference::Auto, 1, subsystem.tracker(), None),
        None
    );
}

#[test]
fn custom_order_with_relative_tokens() {
    let bindings = bindings();
    let resolver = BindingPreferenceResolver::new();
    let order = PreferenceOrder::new(vec![DeviceToken::LastInput, DeviceToken::Gamepad]).unwrap();
    let mut tracker = InputModeTracker::default();
    tracker.handle_key_down(0, Key::Keyboard(KeyCode::Tab));

    let picked = resolver.resolve(
        bindings.action_mappings("interact"),
        &order,
        tracker.last_mode(0),
        tracker.last_button_mode(0),
    );
    assert_eq!(picked.map(|m| m.key), Some(Key::Keyboard(KeyCode::KeyE)));
}
