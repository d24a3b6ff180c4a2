//! Button Gallery entry point
//!
//! On the web: mounts the gallery into `#gallery`, binds one DOM button per
//! entity and drives the simulation from `requestAnimationFrame`.
//! Natively: runs the simulation headless and logs what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_gallery {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement};

    use button_gallery::audio::AudioManager;
    use button_gallery::catalog::{GalleryEntity, parse_catalog};
    use button_gallery::sim::{Gallery, GalleryEvent};
    use button_gallery::{CellReader, Settings};

    /// Container the buttons are positioned in
    const CONTAINER_ID: &str = "gallery";
    /// `<script type="application/json">` holding the entity list
    const DATA_ID: &str = "gallery-data";

    /// A DOM button and the coordinate cell it follows
    struct BoundButton {
        element: HtmlElement,
        reader: CellReader,
    }

    struct App {
        gallery: Gallery,
        container: HtmlElement,
        buttons: Vec<BoundButton>,
        audio: AudioManager,
    }

    impl App {
        /// Re-measure the container and push the result into the gallery
        fn measure(&mut self) {
            let width = self.container.offset_width() as f32;
            let height = self.container.offset_height() as f32;
            self.gallery.resize(width, height);

            let mode = self.gallery.mode();
            let _ = self.container.set_attribute("data-mode", mode.as_str());

            let size = format!("{}px", self.gallery.config().body_size);
            for button in &self.buttons {
                let style = button.element.style();
                let _ = style.set_property("width", &size);
                let _ = style.set_property("height", &size);
            }
            self.sync();
        }

        /// One animation frame
        fn frame(&mut self) {
            if self.gallery.tick() {
                self.sync();
            }
        }

        /// Move only the buttons whose cell changed
        fn sync(&mut self) {
            for button in &mut self.buttons {
                if let Some(pos) = button.reader.poll() {
                    let transform = format!("translate({}px, {}px)", pos.x, pos.y);
                    let _ = button.element.style().set_property("transform", &transform);
                }
            }
        }

        fn hover(&mut self, index: usize) {
            self.gallery.hover(index);
            self.flush_events();
        }

        fn activate(&mut self, index: usize) {
            self.gallery.activate(index);
            self.flush_events();
        }

        fn flush_events(&mut self) {
            for event in self.gallery.drain_events() {
                match event {
                    GalleryEvent::Tone { index } => self.audio.play_tone(index),
                    GalleryEvent::Navigate { target } => navigate(&target),
                }
            }
        }
    }

    /// `prefers-reduced-motion: reduce` media query
    fn prefers_reduced_motion(window: &web_sys::Window) -> bool {
        window
            .match_media("(prefers-reduced-motion: reduce)")
            .ok()
            .flatten()
            .is_some_and(|query| query.matches())
    }

    fn navigate(target: &str) {
        let Some(window) = web_sys::window() else { return };
        log::info!("Navigating to {}", target);
        if let Err(e) = window.location().set_href(target) {
            log::warn!("Navigation to {} failed: {:?}", target, e);
        }
    }

    fn load_entities(document: &Document) -> Vec<GalleryEntity> {
        let Some(json) = document
            .get_element_by_id(DATA_ID)
            .and_then(|el| el.text_content())
        else {
            log::warn!("No #{} element - gallery is empty", DATA_ID);
            return Vec::new();
        };

        match parse_catalog(&json) {
            Ok(entities) => {
                log::info!("Loaded {} gallery entries", entities.len());
                entities
            }
            Err(e) => {
                log::error!("Unreadable gallery data: {}", e);
                Vec::new()
            }
        }
    }

    fn build_button(document: &Document, entity: &GalleryEntity) -> Result<HtmlElement, JsValue> {
        let button: HtmlElement = document.create_element("button")?.dyn_into()?;
        button.set_class_name("gallery-button");
        button.set_attribute("aria-label", &entity.title)?;

        let style = button.style();
        style.set_property("position", "absolute")?;
        style.set_property("left", "0")?;
        style.set_property("top", "0")?;
        if let Some(url) = entity.image_url() {
            style.set_property("background-image", &format!("url({})", url))?;
        }

        let label = document.create_element("span")?;
        label.set_class_name("gallery-title");
        label.set_text_content(Some(&entity.title));
        button.append_child(&label)?;

        Ok(button)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Button gallery starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let Some(container) = document
            .get_element_by_id(CONTAINER_ID)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            log::error!("No #{} element - nothing to mount", CONTAINER_ID);
            return;
        };

        let mut settings = Settings::load();
        if settings.follow_system_motion(prefers_reduced_motion(&window)) {
            log::info!("Following the system reduced-motion preference");
            settings.save();
        }
        let seed = js_sys::Date::now() as u64;
        let mut gallery = Gallery::new(load_entities(&document), seed);
        gallery.apply_settings(&settings);

        let mut audio = AudioManager::new();
        audio.set_volume(settings.effective_volume());

        // One DOM button per particle, bound to its cell
        let mut buttons = Vec::with_capacity(gallery.entities().len());
        for (index, entity) in gallery.entities().iter().enumerate() {
            let Some(reader) = gallery.bridge().reader(index) else { continue };
            match build_button(&document, entity) {
                Ok(element) => {
                    if let Err(e) = container.append_child(&element) {
                        log::warn!("Could not attach button {}: {:?}", entity.slug, e);
                        continue;
                    }
                    buttons.push((index, BoundButton { element, reader }));
                }
                Err(e) => log::warn!("Could not build button {}: {:?}", entity.slug, e),
            }
        }

        let handles: Vec<(usize, HtmlElement)> = buttons
            .iter()
            .map(|(index, b)| (*index, b.element.clone()))
            .collect();

        let app = Rc::new(RefCell::new(App {
            gallery,
            container,
            buttons: buttons.into_iter().map(|(_, b)| b).collect(),
            audio,
        }));

        for (index, element) in handles {
            setup_button_handlers(&element, index, app.clone());
        }

        app.borrow_mut().measure();
        setup_resize_handler(app.clone());

        request_animation_frame(app);

        log::info!("Button gallery running!");
    }

    fn setup_button_handlers(element: &HtmlElement, index: usize, app: Rc<RefCell<App>>) {
        // Hover: tone (desktop only, decided by the gallery)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().hover(index);
            });
            let _ = element
                .add_event_listener_with_callback("mouseenter", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click/tap: tone, then navigate
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().activate(index);
            });
            let _ =
                element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().measure();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |_time: f64| {
            gallery_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn gallery_loop(app: Rc<RefCell<App>>) {
        app.borrow_mut().frame();
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_gallery::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Button gallery (native) starting...");
    log::info!("Native mode runs headless - build for wasm32 for the web gallery");

    run_headless(std::env::args().any(|arg| arg == "--json"));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Ten seconds of a 24-button desktop gallery, then a drop to mobile width
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(dump_json: bool) {
    use button_gallery::{Gallery, GalleryEntity, Mode};

    const BUTTONS: usize = 24;
    const TICKS: usize = 600;

    let entities = (0..BUTTONS)
        .map(|i| {
            GalleryEntity::new(
                format!("project-{i:02}"),
                format!("Project {i:02}"),
                format!("/img/project-{i:02}.png"),
            )
        })
        .collect();

    let mut gallery = Gallery::new(entities, 0x5eed);
    gallery.resize(1280.0, 720.0);

    let mut wall_hits = 0;
    let mut collisions = 0;
    for _ in 0..TICKS {
        gallery.tick();
        let stats = gallery.last_stats();
        wall_hits += stats.wall_hits;
        collisions += stats.collisions;
    }

    let bounds = gallery.config().bounds();
    let in_bounds = gallery
        .particles()
        .iter()
        .all(|p| p.pos.x >= 0.0 && p.pos.x <= bounds.x && p.pos.y >= 0.0 && p.pos.y <= bounds.y);

    log::info!(
        "{} ticks: {} wall contacts, {} collisions, max speed {:.3}",
        gallery.ticks(),
        wall_hits,
        collisions,
        gallery.particles().max_speed()
    );
    assert!(in_bounds, "Buttons escaped the container");
    println!("✓ {} buttons stayed in bounds for {} ticks", BUTTONS, TICKS);

    if dump_json {
        match serde_json::to_string_pretty(gallery.particles()) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Could not serialize particles: {}", e),
        }
    }

    gallery.resize(500.0, 900.0);
    assert_eq!(gallery.mode(), Mode::StaticGrid);
    let parked = gallery.particles().as_slice().to_vec();
    for _ in 0..100 {
        gallery.tick();
    }
    assert_eq!(parked.as_slice(), gallery.particles().as_slice());
    println!("✓ Static grid held still for 100 ticks");
}
