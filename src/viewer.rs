use sfml::graphics::{
    CircleShape, Color, Font, PrimitiveType, RectangleShape, RenderStates, RenderTarget,
    RenderWindow, Shape, Text, Transform, Transformable, Vertex,
};
use sfml::system::{Clock, Vector2u};
use sfml::window::{ContextSettings, Event, Key, Style, VideoMode};
use sfml::SfBox;

use bitflags::bitflags;

use crate::geometry;

bitflags! {
    pub struct Flags: u8 {
        const PAUSE = 1 << 0;
        const DRAW_GUI = 1 << 1;
        const FONT_FAILURE = 1 << 2;
        const SHOW_CURSOR = 1 << 3;
    }
}

const BACKGROUND: Color = Color {
    r: 0,
    g: 204,
    b: 204,
    a: 255,
};

const SQUARE_FILL: Color = Color {
    r: 255,
    g: 0,
    b: 0,
    a: 255,
};

pub const MARKER_RADIUS: f32 = 5.0;

/// Marker centers with their fill colors, in draw order. These are fixed
/// screen-space decorations; they coincide with the pivot anchors but are
/// not derived from them.
const MARKERS: [(f32, f32, Color); 4] = [
    (160.0, 160.0, Color { r: 0, g: 128, b: 0, a: 255 }),
    (240.0, 240.0, Color { r: 255, g: 255, b: 255, a: 255 }),
    (240.0, 160.0, Color { r: 0, g: 0, b: 255, a: 255 }),
    (160.0, 240.0, Color { r: 255, g: 0, b: 0, a: 255 }),
];

/// Which corner marker the per-frame rotation pivots around.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pivot {
    Red,
    Green,
    Blue,
    White,
}

impl Pivot {
    pub fn from_key(code: Key) -> Option<Pivot> {
        match code {
            Key::R => Some(Pivot::Red),
            Key::G => Some(Pivot::Green),
            Key::B => Some(Pivot::Blue),
            Key::W => Some(Pivot::White),
            _ => None,
        }
    }

    /// Fixed pixel anchor of this pivot's marker.
    pub fn anchor(self) -> (f32, f32) {
        match self {
            Pivot::Red => (160.0, 240.0),
            Pivot::Green => (160.0, 160.0),
            Pivot::Blue => (240.0, 160.0),
            Pivot::White => (240.0, 240.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Pivot::Red => "red",
            Pivot::Green => "green",
            Pivot::Blue => "blue",
            Pivot::White => "white",
        }
    }
}

pub struct App {
    pub fps_clock: SfBox<Clock>,
    pub ctx_settings: ContextSettings,

    pub flags: Flags,
    pub font: Option<SfBox<Font>>,

    pub debug_text: String,

    pub window: Option<RenderWindow>,
    pub size: Vector2u,
    pub fps_limit: u32,

    pub scale: f32,
    pub angle_delta: f32,
    pub pivot: Pivot,

    /// Accumulated drawing transform. Deliberately never reset: every tick
    /// composes another pivot rotation on top, as the original demo does.
    pub transform: Transform,
}

impl App {
    //
    // Lifecycle code
    //

    pub fn new() -> App {
        App {
            fps_clock: Clock::start(),
            ctx_settings: ContextSettings::default(),
            flags: Flags::empty(),
            font: None,
            debug_text: String::new(),
            window: None,
            size: (320, 320).into(),
            fps_limit: 60,
            scale: 1.0,
            // Degrees per frame; negative spins clockwise.
            angle_delta: -2.0,
            pivot: Pivot::Red,
            transform: Transform::IDENTITY,
        }
    }

    pub fn init(&mut self, full: bool) {
        if full {
            self.flags = Flags::SHOW_CURSOR;

            if let Some(font) = Font::from_file("font.ttf") {
                self.font = Some(font);
            } else {
                self.flags |= Flags::FONT_FAILURE;
            }

            self.pivot = Pivot::Red;
            self.transform = Transform::IDENTITY;

            self.ctx_settings.antialiasing_level = 8;
        }

        if self.window.is_some() {
            let window = self.window.as_mut().unwrap();
            if window.is_open() {
                window.close()
            }
        }

        // The viewport is read once at startup; Style::CLOSE forbids
        // resizing, so it never needs revisiting.
        let mut window = RenderWindow::new(
            VideoMode::from((self.size.x, self.size.y)),
            "Pivot Square",
            Style::CLOSE,
            &self.ctx_settings,
        );
        window.set_framerate_limit(self.fps_limit);
        window.set_mouse_cursor_visible(self.flags.contains(Flags::SHOW_CURSOR));

        self.window = Some(window);
    }

    pub fn run(&mut self) {
        if self.window.is_none() {
            self.init(true);
        }

        'main_loop: while self.window.as_ref().unwrap().is_open() {
            // Drain input before the tick so key handling orders
            // deterministically relative to rendering.
            while let Some(event) = self.window.as_mut().unwrap().poll_event() {
                match event {
                    Event::Closed => {
                        self.close();
                        break 'main_loop;
                    }
                    Event::KeyPressed { code, .. } => {
                        if !self.process_key(code) {
                            break 'main_loop;
                        }
                    }
                    _ => (),
                }
            }

            // Draw with the transform accumulated so far, then compose the
            // next rotation, matching the original's draw-then-rotate tick.
            self.request_draw();
            self.window.as_mut().unwrap().display();
            self.request_update();
        }
    }

    //
    // Input processing code
    //

    pub fn process_key(&mut self, code: Key) -> bool {
        if let Some(pivot) = Pivot::from_key(code) {
            self.pivot = pivot;
            return true;
        }

        match code {
            Key::Escape => {
                self.close();
                return false;
            }
            Key::Space => self.flags.toggle(Flags::PAUSE),
            Key::F3 => self.flags.toggle(Flags::DRAW_GUI),
            Key::H => {
                self.flags.toggle(Flags::SHOW_CURSOR);
                self.window
                    .as_mut()
                    .unwrap()
                    .set_mouse_cursor_visible(self.flags.contains(Flags::SHOW_CURSOR));
            }
            _ => (),
        }
        true
    }

    fn close(&mut self) {
        self.window.as_mut().unwrap().close();
    }

    //
    // Update code
    //

    pub fn request_update(&mut self) {
        let fps = self.get_fps();

        if !self.flags.contains(Flags::PAUSE) {
            self.tick_transform();
        }

        let anchor = self.pivot.anchor();
        self.debug_text = format!(
            include_str!("debug_screen_template.txt"),
            fps,
            if self.fps_limit > 0 {
                format!(" (max: {})", self.fps_limit)
            } else {
                "".to_owned()
            },
            if self.flags.contains(Flags::PAUSE) {
                "[paused]"
            } else {
                ""
            },
            self.pivot.name(),
            anchor.0,
            anchor.1,
            self.angle_delta,
            self.scale,
            self.size.x,
            self.size.y,
            self.flags.bits
        );
    }

    /// Composes one per-frame rotation about the active pivot's anchor onto
    /// the accumulated transform. Switching pivots does not undo what the
    /// previous pivot accumulated; the new rotation stacks on top. The
    /// original demo behaves this way, so it is kept, quirk and all.
    pub fn tick_transform(&mut self) {
        let (x, y) = self.pivot.anchor();
        self.transform.rotate_with_center(self.angle_delta, x, y);
    }

    fn get_fps(&mut self) -> f32 {
        let current_time = self.fps_clock.restart().as_seconds();
        1.0 / current_time
    }

    //
    // Draw code
    //

    pub fn request_draw(&mut self) {
        let mut states = RenderStates::DEFAULT;
        states.transform = self.transform;

        let render_target = self.window.as_mut().unwrap();
        render_target.clear(Color::BLACK);
        Self::draw_frame(render_target, self.scale, self.size, &states);

        if self.flags.contains(Flags::DRAW_GUI) && !self.flags.contains(Flags::FONT_FAILURE) {
            let mut debug_label = Text::new(&self.debug_text, self.font.as_ref().unwrap(), 16);
            debug_label.set_fill_color(Color::WHITE);
            debug_label.set_outline_color(Color::BLACK);
            debug_label.set_outline_thickness(1.5);
            debug_label.set_position((10.0, 10.0));
            render_target.draw(&debug_label);
        }
    }

    /// Paints one frame: teal backdrop, red square polygon, four marker
    /// dots. Everything goes through the supplied render states, the way
    /// the original pushes every paint through the canvas matrix. Pure
    /// function of its arguments; repeated calls paint identically.
    pub fn draw_frame(
        render_target: &mut dyn RenderTarget,
        scale: f32,
        size: Vector2u,
        states: &RenderStates,
    ) {
        let mut backdrop = RectangleShape::with_size((size.x as f32, size.y as f32).into());
        backdrop.set_fill_color(BACKGROUND);
        render_target.draw_with_renderstates(&backdrop, states);

        let quad = geometry::outline_points(scale, size)
            .map(|p| Vertex::new(p, SQUARE_FILL, (0.0, 0.0).into()));
        render_target.draw_primitives(&quad, PrimitiveType::TRIANGLE_FAN, states);

        for &(x, y, color) in MARKERS.iter() {
            let mut marker = CircleShape::new(MARKER_RADIUS, 30);
            marker.set_origin((MARKER_RADIUS, MARKER_RADIUS));
            marker.set_position((x, y));
            marker.set_outline_color(Color::BLACK);
            marker.set_outline_thickness(1.0);
            marker.set_fill_color(color);
            render_target.draw_with_renderstates(&marker, states);
        }
    }
}
