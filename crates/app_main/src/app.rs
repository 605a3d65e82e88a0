//! Application main loop
//!
//! The UI thread never blocks on the host: every command is spawned on
//! the tokio runtime and its result comes back through a channel that is
//! drained once per frame.

use std::sync::Arc;

use anyhow::Result;
use app_core::{AppState, OutcomeText, TaskOptions};
use app_ui::{
    components::{
        ConfirmDialog, CreateLibraryDialog, Dialog, DialogResult, FrameBar, FrameBarAction,
        GridAction, ImportDialog, NotificationPanel, PanelAction, PhotoGrid, PickerAction,
        ToastOverlay,
    },
    pickers, Renderer, Theme,
};
use crossbeam_channel::{Receiver, Sender};
use egui_wgpu::ScreenDescriptor;
use host_proto::{Item, Library};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

/// Results of host calls, delivered back to the UI thread
enum UiMessage {
    LibrariesLoaded(Vec<Library>),
    RestoreSelection(String),
    LibrarySelected(String),
    LibraryUnreachable(String),
    ItemsLoaded { library_id: String, items: Vec<Item> },
    LibraryCreated(Library),
    LibraryRemoved(String),
}

/// Main application state for the event loop
struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    egui_ctx: egui::Context,
    egui_state: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,

    state: Arc<AppState>,
    runtime: tokio::runtime::Handle,
    tx: Sender<UiMessage>,
    rx: Receiver<UiMessage>,

    // UI components
    frame_bar: FrameBar,
    photo_grid: PhotoGrid,
    notification_panel: NotificationPanel,
    toasts: Option<Arc<ToastOverlay>>,
    create_dialog: Option<CreateLibraryDialog>,
    import_dialog: Option<ImportDialog>,
    remove_dialog: Option<(String, ConfirmDialog)>,
    theme: Theme,
}

impl App {
    fn new(state: Arc<AppState>, runtime: tokio::runtime::Handle) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();

        let (theme, thumbnail_size, show_filenames) = {
            let config = state.config.read();
            (
                Theme::by_name(&config.general.theme),
                config.grid.thumbnail_size,
                config.grid.show_filenames,
            )
        };

        Self {
            window: None,
            renderer: None,
            egui_ctx: egui::Context::default(),
            egui_state: None,
            egui_renderer: None,

            state,
            runtime,
            tx,
            rx,

            frame_bar: FrameBar::new(),
            photo_grid: PhotoGrid::new(thumbnail_size, show_filenames),
            notification_panel: NotificationPanel::new(),
            toasts: None,
            create_dialog: None,
            import_dialog: None,
            remove_dialog: None,
            theme,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let start_maximized = self.state.config.read().general.start_maximized;

        let window_attrs = Window::default_attributes()
            .with_title("Lumina")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
            .with_maximized(start_maximized);

        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let renderer = pollster::block_on(Renderer::new(window.clone()))?;

        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );

        let egui_renderer =
            egui_wgpu::Renderer::new(&renderer.device, renderer.config.format, None, 1, false);

        self.theme.apply(&self.egui_ctx);

        // Toasts need the context for repaint requests, so they can only
        // exist from here on
        let toasts = Arc::new(ToastOverlay::new(self.egui_ctx.clone()));
        self.state.notifications.set_sink(toasts.clone());
        self.toasts = Some(toasts);

        let repaint_ctx = self.egui_ctx.clone();
        self.state.notifications.subscribe(move || {
            repaint_ctx.request_repaint();
        });

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.egui_state = Some(egui_state);
        self.egui_renderer = Some(egui_renderer);

        self.load_libraries(true);

        Ok(())
    }

    // ========================================
    // Host flows
    // ========================================

    /// Fetch the library list; optionally also restore the persisted
    /// selection afterwards (startup only).
    fn load_libraries(&self, restore_selection: bool) {
        let state = self.state.clone();
        let tx = self.tx.clone();
        let ctx = self.egui_ctx.clone();

        self.runtime.spawn(async move {
            if let Some(libraries) = state.host.get_libraries().await.into_data() {
                let _ = tx.send(UiMessage::LibrariesLoaded(libraries));
            }

            if restore_selection {
                if let Some(Some(id)) = state.host.get_selected_library().await.into_data() {
                    let _ = tx.send(UiMessage::RestoreSelection(id));
                }
            }

            ctx.request_repaint();
        });
    }

    /// Validate the library path, persist the selection and load items
    fn select_library(&self, library_id: String) {
        let state = self.state.clone();
        let tx = self.tx.clone();
        let ctx = self.egui_ctx.clone();

        self.runtime.spawn(async move {
            match state.host.check_library_path(library_id.clone()).await.into_data() {
                Some(true) => {}
                Some(false) => {
                    tracing::warn!(library = %library_id, "Library folder is missing");
                    let _ = tx.send(UiMessage::LibraryUnreachable(library_id));
                    ctx.request_repaint();
                    return;
                }
                None => return,
            }

            state
                .host
                .set_selected_library(Some(library_id.clone()))
                .await;
            let _ = tx.send(UiMessage::LibrarySelected(library_id.clone()));

            if let Some(items) = state.host.get_items(library_id.clone()).await.into_data() {
                let _ = tx.send(UiMessage::ItemsLoaded { library_id, items });
            }
            ctx.request_repaint();
        });
    }

    /// Reload the item list of the selected library
    fn reload_items(&self) {
        let Some(library_id) = self.state.libraries.read().selected_id().map(String::from)
        else {
            return;
        };

        let state = self.state.clone();
        let tx = self.tx.clone();
        let ctx = self.egui_ctx.clone();

        self.runtime.spawn(async move {
            if let Some(items) = state.host.get_items(library_id.clone()).await.into_data() {
                let _ = tx.send(UiMessage::ItemsLoaded { library_id, items });
                ctx.request_repaint();
            }
        });
    }

    fn create_library(&self, request: app_ui::components::CreateLibraryRequest) {
        let state = self.state.clone();
        let tx = self.tx.clone();
        let ctx = self.egui_ctx.clone();

        self.runtime.spawn(async move {
            let outcome = state
                .host
                .create_library(
                    request.name.clone(),
                    request.icon,
                    request.color,
                    request.path.display().to_string(),
                )
                .await;

            if let Some(library) = outcome.into_data() {
                state.notifications.push(
                    "Library created",
                    Some(format!("\"{}\" is ready", request.name)),
                    app_core::NotificationKind::Success,
                );
                let _ = tx.send(UiMessage::LibraryCreated(library));
                ctx.request_repaint();
            }
        });
    }

    /// Point an unreachable library at a newly picked folder, then retry
    /// selecting it
    fn relocate_library(&self, library_id: String, path: std::path::PathBuf) {
        let state = self.state.clone();
        let tx = self.tx.clone();
        let ctx = self.egui_ctx.clone();

        self.runtime.spawn(async move {
            let outcome = state
                .host
                .update_library_path(library_id.clone(), path.display().to_string())
                .await;

            if outcome.is_ok() {
                let _ = tx.send(UiMessage::RestoreSelection(library_id));
                ctx.request_repaint();
            }
        });
    }

    fn remove_library(&self, library_id: String) {
        let state = self.state.clone();
        let tx = self.tx.clone();
        let ctx = self.egui_ctx.clone();

        self.runtime.spawn(async move {
            if state
                .host
                .remove_library(library_id.clone())
                .await
                .is_ok()
            {
                let _ = tx.send(UiMessage::LibraryRemoved(library_id));
                ctx.request_repaint();
            }
        });
    }

    /// Kick off a task-tracked import. The tracking notification owns the
    /// outcome presentation, so the raw host call is used here.
    fn start_import(&self, request: app_ui::components::ImportRequest) {
        let Some(library_id) = self.state.libraries.read().selected_id().map(String::from)
        else {
            return;
        };

        let count = request.source_paths.len();
        let paths: Vec<String> = request
            .source_paths
            .iter()
            .map(|p| p.display().to_string())
            .collect();

        let host = self.state.host.clone();
        let tx = self.tx.clone();
        let ctx = self.egui_ctx.clone();
        let task_library = library_id.clone();

        self.state.notifications.push_task(
            "Importing",
            Some(format!("{} files", count)),
            TaskOptions {
                peek: Some(format!("Importing {} files", count)),
                on_success: Some(OutcomeText {
                    title: Some("Import complete".to_string()),
                    description: Some(format!("{} files added", count)),
                }),
                on_error: Some(OutcomeText {
                    title: Some("Import failed".to_string()),
                    description: None,
                }),
                ..Default::default()
            },
            async move {
                let items = host
                    .try_add_items(task_library.clone(), paths, request.delete_source)
                    .await?;
                let _ = tx.send(UiMessage::ItemsLoaded {
                    library_id: task_library,
                    items,
                });
                ctx.request_repaint();
                Ok(())
            },
        );
    }

    fn set_selection_favorite(&self, favorite: bool) {
        let Some(library_id) = self.state.libraries.read().selected_id().map(String::from)
        else {
            return;
        };
        let item_ids = self.state.selection.read().ids().to_vec();
        if item_ids.is_empty() {
            return;
        }

        let state = self.state.clone();
        let tx = self.tx.clone();
        let ctx = self.egui_ctx.clone();

        self.runtime.spawn(async move {
            if state
                .host
                .set_items_favorite(library_id.clone(), item_ids, favorite)
                .await
                .is_ok()
            {
                if let Some(items) = state.host.get_items(library_id.clone()).await.into_data() {
                    let _ = tx.send(UiMessage::ItemsLoaded { library_id, items });
                    ctx.request_repaint();
                }
            }
        });
    }

    // ========================================
    // Message handling
    // ========================================

    fn process_messages(&mut self) {
        while let Ok(message) = self.rx.try_recv() {
            match message {
                UiMessage::LibrariesLoaded(libraries) => {
                    self.state.libraries.write().set_libraries(libraries);
                }
                UiMessage::RestoreSelection(id) => {
                    self.select_library(id);
                }
                UiMessage::LibrarySelected(id) => {
                    let changed = self.state.libraries.write().select(&id).is_some();
                    if changed {
                        self.state.clear_items();
                    }
                }
                UiMessage::LibraryUnreachable(id) => {
                    self.state.notifications.push(
                        "Library folder not found",
                        Some("Locate the folder to keep using this library".to_string()),
                        app_core::NotificationKind::Warning,
                    );
                    self.state.libraries.write().mark_pending(id);
                    self.state.clear_items();
                }
                UiMessage::ItemsLoaded { library_id, items } => {
                    // Stale response from a previous selection
                    if self.state.libraries.read().selected_id() == Some(library_id.as_str()) {
                        self.state.set_items(items);
                    }
                }
                UiMessage::LibraryCreated(library) => {
                    let id = library.id.clone();
                    self.state.libraries.write().libraries.push(library);
                    self.select_library(id);
                }
                UiMessage::LibraryRemoved(id) => {
                    let was_selected = {
                        let mut libs = self.state.libraries.write();
                        let was_selected = libs.selected_id() == Some(id.as_str());
                        libs.remove(&id);
                        was_selected
                    };
                    if was_selected {
                        self.state.clear_items();
                    }
                }
            }
        }
    }

    // ========================================
    // UI
    // ========================================

    fn handle_frame_bar_action(&mut self, action: FrameBarAction) {
        match action {
            FrameBarAction::Picker(PickerAction::Select(id)) => {
                self.select_library(id);
            }
            FrameBarAction::Picker(PickerAction::CreateNew) => {
                self.state.libraries.write().create_dialog_open = true;
                self.create_dialog = Some(CreateLibraryDialog::new());
            }
            FrameBarAction::Picker(PickerAction::Remove(id)) => {
                let name = self
                    .state
                    .libraries
                    .read()
                    .library(&id)
                    .map(|l| l.name.clone())
                    .unwrap_or_else(|| "this library".to_string());
                self.remove_dialog = Some((id, ConfirmDialog::new_remove_library(&name)));
            }
            FrameBarAction::Import => {
                if let Some(paths) = pickers::pick_import_files() {
                    let (delete_source, confirm) = {
                        let config = self.state.config.read();
                        (config.import.delete_source, config.import.confirm_import)
                    };
                    if confirm {
                        self.import_dialog = Some(ImportDialog::new(paths, delete_source));
                    } else {
                        self.start_import(app_ui::components::ImportRequest {
                            source_paths: paths,
                            delete_source,
                        });
                    }
                }
            }
            FrameBarAction::ToggleNotifications => {
                let open = self.state.notifications.is_panel_open();
                self.state.notifications.set_panel_open(!open);
            }
        }
    }

    fn handle_grid_action(&mut self, action: GridAction) {
        match action {
            GridAction::Clicked { index, modifiers } => {
                let items = self.state.items.read();
                self.state
                    .selection
                    .write()
                    .on_item_click(index, &items, modifiers);
            }
            GridAction::ContextClicked { index } => {
                let items = self.state.items.read();
                if let Some(item) = items.get(index) {
                    self.state
                        .selection
                        .write()
                        .right_click_select(index, &item.id);
                }
            }
            GridAction::SetFavorite { favorite } => {
                self.set_selection_favorite(favorite);
            }
            GridAction::BackgroundClicked => {
                self.state.selection.write().clear();
            }
        }
    }

    fn handle_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(mut dialog) = self.create_dialog.take() {
            match dialog.ui(ctx) {
                DialogResult::Ok(request) => {
                    self.state.libraries.write().create_dialog_open = false;
                    self.create_library(request);
                }
                DialogResult::Cancel => {
                    self.state.libraries.write().create_dialog_open = false;
                }
                DialogResult::None => self.create_dialog = Some(dialog),
            }
        }

        if let Some(mut dialog) = self.import_dialog.take() {
            match dialog.ui(ctx) {
                DialogResult::Ok(request) => self.start_import(request),
                DialogResult::Cancel => {}
                DialogResult::None => self.import_dialog = Some(dialog),
            }
        }

        if let Some((id, mut dialog)) = self.remove_dialog.take() {
            match dialog.ui(ctx) {
                DialogResult::Ok(_) => self.remove_library(id),
                DialogResult::Cancel => {}
                DialogResult::None => self.remove_dialog = Some((id, dialog)),
            }
        }
    }

    /// Prompt shown instead of the grid while a library's folder is
    /// missing
    fn pending_library_ui(&mut self, ui: &mut egui::Ui, library_id: String) {
        let name = self
            .state
            .libraries
            .read()
            .library(&library_id)
            .map(|l| l.name.clone())
            .unwrap_or_else(|| "library".to_string());

        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.3);
            ui.label(
                egui::RichText::new(format!("The folder for \"{}\" can't be found.", name))
                    .color(self.theme.text)
                    .size(16.0),
            );
            ui.label(
                egui::RichText::new("It may have been moved, renamed or unmounted.")
                    .color(self.theme.text_secondary),
            );
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                ui.add_space(ui.available_width() / 2.0 - 120.0);
                if ui.button("Locate folder...").clicked() {
                    if let Some(path) = pickers::pick_library_folder("Locate library folder") {
                        self.state.libraries.write().pending_library_id = None;
                        self.relocate_library(library_id.clone(), path);
                    }
                }
                if ui.button("Dismiss").clicked() {
                    self.state.libraries.write().pending_library_id = None;
                }
            });
        });
    }

    fn draw_ui(&mut self, ctx: &egui::Context) {
        self.process_messages();

        let (libraries, selected_id, pending_id) = {
            let libs = self.state.libraries.read();
            (
                libs.libraries.clone(),
                libs.selected_id().map(String::from),
                libs.pending_library_id.clone(),
            )
        };
        let peek = self.state.notifications.peek();
        let notification_count = self.state.notifications.len();

        let mut frame_action = None;
        egui::TopBottomPanel::top("frame_bar").show(ctx, |ui| {
            frame_action = self.frame_bar.ui(
                ui,
                &libraries,
                selected_id.as_deref(),
                peek.as_ref(),
                notification_count,
                &self.theme,
            );
        });
        if let Some(action) = frame_action {
            self.handle_frame_bar_action(action);
        }

        if self.state.notifications.is_panel_open() {
            let notifications = self.state.notifications.notifications();
            let mut panel_action = None;
            egui::SidePanel::right("notification_panel")
                .default_width(320.0)
                .show(ctx, |ui| {
                    panel_action = self.notification_panel.ui(ui, &notifications, &self.theme);
                });
            match panel_action {
                Some(PanelAction::Dismiss(id)) => self.state.notifications.dismiss(id),
                Some(PanelAction::ClearAll) => self.state.notifications.clear_all(),
                Some(PanelAction::Close) => self.state.notifications.set_panel_open(false),
                None => {}
            }
        }

        let mut grid_action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(pending) = pending_id {
                self.pending_library_ui(ui, pending);
            } else if selected_id.is_some() {
                let items = self.state.items.read().clone();
                let selection = self.state.selection.read().clone();
                egui::ScrollArea::vertical().show(ui, |ui| {
                    grid_action = self.photo_grid.ui(ui, &items, &selection, &self.theme);
                });
            } else {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() * 0.3);
                    ui.label(
                        egui::RichText::new("Pick a library to get started")
                            .color(self.theme.text_secondary)
                            .size(16.0),
                    );
                    ui.add_space(8.0);
                    if ui.button("➕ New library").clicked() {
                        self.state.libraries.write().create_dialog_open = true;
                        self.create_dialog = Some(CreateLibraryDialog::new());
                    }
                });
            }
        });
        if let Some(action) = grid_action {
            self.handle_grid_action(action);
        }

        self.handle_dialogs(ctx);

        if let Some(toasts) = &self.toasts {
            toasts.ui(ctx, &self.theme);
        }
    }

    // ========================================
    // Rendering
    // ========================================

    fn render(&mut self) {
        let window = match &self.window {
            Some(w) => w.clone(),
            None => return,
        };

        let raw_input = match &mut self.egui_state {
            Some(s) => s.take_egui_input(&window),
            None => return,
        };

        let egui_ctx = self.egui_ctx.clone();
        let full_output = egui_ctx.run(raw_input, |ctx| {
            self.draw_ui(ctx);
        });

        if let Some(egui_state) = &mut self.egui_state {
            egui_state.handle_platform_output(&window, full_output.platform_output);
        }

        let clipped_primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let renderer = match &self.renderer {
            Some(r) => r,
            None => return,
        };
        let egui_renderer = match &mut self.egui_renderer {
            Some(r) => r,
            None => return,
        };

        let output = match renderer.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => return,
            Err(e) => {
                tracing::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [renderer.size.0, renderer.size.1],
            pixels_per_point: window.scale_factor() as f32,
        };

        let mut encoder = renderer
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui encoder"),
            });

        for (id, delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(&renderer.device, &renderer.queue, *id, delta);
        }

        egui_renderer.update_buffers(
            &renderer.device,
            &renderer.queue,
            &mut encoder,
            &clipped_primitives,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui render pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color {
                                r: 0.07,
                                g: 0.07,
                                b: 0.08,
                                a: 1.0,
                            }),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();

            egui_renderer.render(&mut render_pass, &clipped_primitives, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        renderer.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                tracing::error!("Failed to initialize window: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
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
                if let Err(e) = self.state.save_config() {
                    tracing::warn!("Failed to save configuration: {}", e);
                }
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize((size.width, size.height));
                }
            }

            WindowEvent::RedrawRequested => {
                self.render();
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Run the application
pub fn run(state: Arc<AppState>, runtime: tokio::runtime::Handle) -> Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(state, runtime);
    event_loop.run_app(&mut app)?;

    Ok(())
}
