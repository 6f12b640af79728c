//! Application main loop

use crate::window::WinitWindowService;
use anyhow::{Context, Result};
use app_core::{
    AppConfig, Command, FileBrowserModel, JsonPreferenceStore, Spawner, ThemeToggle, WindowChrome,
    WindowService,
};
use app_fs::{NativeDirectoryService, SystemLauncher};
use app_ui::{
    components::{
        BrowserAction, FileBrowser, ThemeSwitch, TitleBar, TitleBarAction, WindowLayout,
    },
    input::is_history_button,
    theme::WINDOW_ROUNDING,
    InputHandler, Renderer, Theme,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    window::{Window, WindowId},
};

/// The OS draws the window buttons itself
const NATIVE_CONTROLS: bool = cfg!(target_os = "macos");

/// Events sent to the loop from outside the UI thread
#[derive(Debug, Clone, Copy)]
enum AppEvent {
    /// Background work finished
    Wake,
}

/// Main application state for the event loop
struct App {
    config: AppConfig,

    window: Option<Arc<Window>>,
    window_service: Option<Arc<WinitWindowService>>,
    renderer: Option<Renderer>,
    egui_ctx: egui::Context,
    egui_state: Option<egui_winit::State>,

    // Models
    browser: FileBrowserModel,
    appearance: ThemeToggle,
    chrome: Option<WindowChrome>,

    // UI Components
    file_browser: FileBrowser,
    input_handler: InputHandler,
    theme: Theme,

    /// egui asked for a delayed repaint
    next_repaint: Option<Instant>,

    _runtime: tokio::runtime::Runtime,
}

impl App {
    fn new(config: AppConfig, proxy: EventLoopProxy<AppEvent>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("binder-io")
            .enable_all()
            .build()
            .context("Failed to start background runtime")?;

        let proxy = Mutex::new(proxy);
        let spawner = Spawner::new(runtime.handle().clone()).with_waker(Arc::new(move || {
            // The loop is gone during shutdown; nothing left to wake
            let _ = proxy.lock().send_event(AppEvent::Wake);
        }));

        let mut browser = FileBrowserModel::new(
            Arc::new(NativeDirectoryService::new()),
            Arc::new(SystemLauncher),
            spawner.clone(),
        );
        browser.start(config.browser.start_directory);

        let appearance = ThemeToggle::new(Arc::new(JsonPreferenceStore::open_default()), spawner);

        Ok(Self {
            file_browser: FileBrowser::new(config.browser.name_display_limit),
            input_handler: InputHandler::new(&config.keybindings),
            theme: Theme::for_mode(appearance.mode()),
            config,

            window: None,
            window_service: None,
            renderer: None,
            egui_ctx: egui::Context::default(),
            egui_state: None,

            browser,
            appearance,
            chrome: None,

            next_repaint: None,
            _runtime: runtime,
        })
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_config = &self.config.window;
        let window_attrs = Window::default_attributes()
            .with_title(window_config.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(window_config.width, window_config.height))
            .with_min_inner_size(winit::dpi::LogicalSize::new(320, 240))
            .with_maximized(window_config.start_maximized)
            .with_transparent(true);

        #[cfg(target_os = "macos")]
        let window_attrs = {
            use winit::platform::macos::WindowAttributesExtMacOS;
            window_attrs
                .with_titlebar_transparent(true)
                .with_title_hidden(true)
                .with_fullsize_content_view(true)
        };
        #[cfg(not(target_os = "macos"))]
        let window_attrs = window_attrs.with_decorations(false);

        let window = Arc::new(event_loop.create_window(window_attrs)?);

        // Initialize renderer
        let renderer = pollster::block_on(Renderer::new(window.clone()))?;

        // Initialize egui
        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            Some(renderer.device.limits().max_texture_dimension_2d as usize),
        );

        let window_service = Arc::new(WinitWindowService::new(window.clone()));
        let chrome = WindowChrome::new(window_service.clone(), NATIVE_CONTROLS);
        tracing::info!("Window created ({:?})", chrome.mode());

        self.theme.apply(&self.egui_ctx);

        self.window = Some(window);
        self.window_service = Some(window_service);
        self.renderer = Some(renderer);
        self.egui_state = Some(egui_state);
        self.chrome = Some(chrome);

        Ok(())
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    /// Apply finished background work; true if the view changed
    fn poll_models(&mut self) -> bool {
        let browser_changed = self.browser.poll();
        let theme_changed = self.appearance.poll();
        if theme_changed {
            self.theme = Theme::for_mode(self.appearance.mode());
            self.theme.apply(&self.egui_ctx);
        }
        browser_changed || theme_changed
    }

    fn execute_command(&mut self, cmd: Command) {
        tracing::debug!("Command {}", cmd.id());
        match cmd {
            Command::Back => {
                self.browser.go_back(1);
            }
            Command::Forward => {
                self.browser.go_back(-1);
            }
            Command::Parent => self.browser.back_out(),
            Command::ToggleTheme => self.appearance.toggle(),
            Command::Minimize => {
                if let Some(chrome) = &self.chrome {
                    chrome.minimize();
                }
            }
            Command::ToggleMaximize => {
                if let Some(chrome) = &self.chrome {
                    chrome.toggle_maximize();
                }
            }
            Command::Exit => {
                if let Some(chrome) = &self.chrome {
                    chrome.close();
                }
            }
        }
    }

    fn handle_title_bar_action(&mut self, action: TitleBarAction) {
        let Some(chrome) = &self.chrome else {
            return;
        };
        match action {
            TitleBarAction::StartDrag => chrome.start_drag(),
            TitleBarAction::Minimize => chrome.minimize(),
            TitleBarAction::ToggleMaximize => chrome.toggle_maximize(),
            TitleBarAction::Close => chrome.close(),
        }
    }

    fn handle_browser_action(&mut self, action: BrowserAction) {
        match action {
            BrowserAction::BackOut => self.browser.back_out(),
            BrowserAction::Back => {
                self.browser.go_back(1);
            }
            BrowserAction::Forward => {
                self.browser.go_back(-1);
            }
            BrowserAction::CommitAddress => self.browser.commit_address(),
            BrowserAction::Open(entry) => self.browser.open_entry(&entry),
        }
    }

    fn render(&mut self) {
        let Some(window) = self.window.clone() else {
            return;
        };
        let Some(egui_state) = &mut self.egui_state else {
            return;
        };
        let Some(chrome) = &self.chrome else {
            return;
        };

        let raw_input = egui_state.take_egui_input(&window);

        let mode = chrome.mode();
        let rounding = if chrome.rounded_corners() { WINDOW_ROUNDING } else { 0.0 };
        let show_controls = chrome.shows_controls();
        let theme_pending = self.appearance.is_pending();
        let suggestions = self.browser.suggestions();

        let theme = &self.theme;
        let title = self.config.window.title.as_str();
        let file_browser = &mut self.file_browser;
        let (navigation, address) = self.browser.view_parts();

        // Track UI actions from egui closure
        let mut title_action = None;
        let mut browser_action = None;
        let mut theme_clicked = false;

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| {
                    let rect = ui.max_rect();
                    ui.painter().rect_filled(rect, rounding, theme.background);
                    let layout = WindowLayout::split(rect);

                    title_action = ui
                        .allocate_new_ui(egui::UiBuilder::new().max_rect(layout.header), |ui| {
                            TitleBar::ui(ui, theme, title, mode, show_controls)
                        })
                        .inner;

                    ui.painter().rect_filled(layout.content, 0.0, theme.content);
                    browser_action = ui
                        .allocate_new_ui(
                            egui::UiBuilder::new().max_rect(layout.content.shrink(4.0)),
                            |ui| file_browser.ui(ui, theme, navigation, address, &suggestions),
                        )
                        .inner;

                    theme_clicked = ui
                        .allocate_new_ui(
                            egui::UiBuilder::new()
                                .max_rect(layout.footer.shrink2(egui::vec2(8.0, 4.0)))
                                .layout(egui::Layout::left_to_right(egui::Align::Center)),
                            |ui| ThemeSwitch::ui(ui, theme, theme_pending),
                        )
                        .inner;
                });
        });

        egui_state.handle_platform_output(&window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        if let Some(renderer) = &mut self.renderer {
            match renderer.paint(&primitives, &full_output.textures_delta, full_output.pixels_per_point) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    renderer.handle_surface_lost();
                    window.request_redraw();
                }
                Err(e) => tracing::error!("Surface error: {:?}", e),
            }
        }

        // Handle UI actions after egui run
        if let Some(action) = title_action {
            self.handle_title_bar_action(action);
        }
        if let Some(action) = browser_action {
            self.handle_browser_action(action);
        }
        if theme_clicked {
            self.appearance.toggle();
        }

        let repaint_delay = full_output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .map(|viewport| viewport.repaint_delay)
            .unwrap_or(Duration::MAX);
        if repaint_delay.is_zero() {
            window.request_redraw();
        } else {
            self.next_repaint = Instant::now().checked_add(repaint_delay);
        }
    }

    /// Exit once the window service has been asked to close
    fn check_close(&self, event_loop: &ActiveEventLoop) {
        if let Some(service) = &self.window_service {
            if service.take_close_request() {
                tracing::info!("Closing window");
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                tracing::error!("Failed to initialize window: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::Wake => {
                if self.poll_models() {
                    self.request_redraw();
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // History buttons act anywhere in the window, egui never uses them
        if let WindowEvent::MouseInput { button, state, .. } = event {
            if is_history_button(button) {
                if let Some(cmd) = self.input_handler.handle_mouse_button(button, state) {
                    self.execute_command(cmd);
                }
                return;
            }
        }

        // Let egui handle the event first
        if let (Some(egui_state), Some(window)) = (&mut self.egui_state, &self.window) {
            let response = egui_state.on_window_event(window, &event);
            if response.repaint {
                window.request_redraw();
            }
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Close requested");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize((size.width, size.height));
                }
                if let Some(service) = &self.window_service {
                    service.notify_resized();
                }
                self.request_redraw();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if !self.egui_ctx.wants_keyboard_input() {
                    if let Some(cmd) = self.input_handler.handle_key(&event) {
                        self.execute_command(cmd);
                    }
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.input_handler.update_modifiers(modifiers.state());
            }

            WindowEvent::RedrawRequested => {
                self.poll_models();
                self.render();
            }

            _ => {}
        }

        self.check_close(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        match self.next_repaint {
            Some(at) if Instant::now() >= at => {
                self.next_repaint = None;
                self.request_redraw();
                event_loop.set_control_flow(ControlFlow::Wait);
            }
            Some(at) => event_loop.set_control_flow(ControlFlow::WaitUntil(at)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

/// Run the application
pub fn run(config: AppConfig) -> Result<()> {
    let event_loop = EventLoop::<AppEvent>::with_user_event()
        .build()
        .context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config, event_loop.create_proxy())?;
    event_loop.run_app(&mut app)?;

    tracing::info!("Event loop finished");
    Ok(())
}
