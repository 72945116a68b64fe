mod geometry;
mod viewer;

use viewer::App;

fn main() {
    let mut app = App::new();
    app.run();
}
