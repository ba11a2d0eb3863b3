//! Demo command modules for the REPL host.
//!
//! These exercise the dispatch features an engine integration would use:
//! get/set overloads sharing a name, enum and bool parameters, returned
//! values, and a capture-all command.

use std::cell::RefCell;
use std::rc::Rc;

use ember_console::{CommandBuilder, CommandModule, CommandOutput, ParamKind};
use ember_types::error::ConsoleError;

/// Mock render settings the graphics commands read and write.
#[derive(Debug, Clone)]
pub struct GraphicsSettings {
    pub fov: f64,
    pub fullscreen: bool,
    pub quality: String,
    pub width: i64,
    pub height: i64,
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self {
            fov: 60.0,
            fullscreen: false,
            quality: "Medium".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

const QUALITY_LEVELS: [&str; 3] = ["Low", "Medium", "High"];

/// `graphics.*` commands over shared [`GraphicsSettings`].
pub struct GraphicsCommands {
    settings: Rc<RefCell<GraphicsSettings>>,
}

impl GraphicsCommands {
    pub fn new(settings: Rc<RefCell<GraphicsSettings>>) -> Self {
        Self { settings }
    }
}

impl CommandModule for GraphicsCommands {
    fn name(&self) -> &str {
        "graphics"
    }

    fn commands(&self) -> Vec<CommandBuilder> {
        let quality_kind =
            ParamKind::Enum(QUALITY_LEVELS.iter().map(|s| s.to_string()).collect());

        let s = Rc::clone(&self.settings);
        let get_fov = CommandBuilder::new(
            "graphics.fov",
            "Get the field of view of the main camera",
        )
        .handler(move |_| Ok(CommandOutput::Text(s.borrow().fov.to_string())));

        let s = Rc::clone(&self.settings);
        let set_fov = CommandBuilder::new(
            "graphics.fov",
            "Set the field of view of the main camera",
        )
        .param("fov", ParamKind::Float)
        .handler(move |args| {
            s.borrow_mut().fov = args[0].as_float()?;
            Ok(CommandOutput::None)
        });

        let s = Rc::clone(&self.settings);
        let fullscreen = CommandBuilder::new("graphics.fullscreen", "Toggle fullscreen")
            .handler(move |_| {
                let mut settings = s.borrow_mut();
                settings.fullscreen = !settings.fullscreen;
                Ok(CommandOutput::Text(format!(
                    "fullscreen: {}",
                    settings.fullscreen
                )))
            });

        let s = Rc::clone(&self.settings);
        let get_quality =
            CommandBuilder::new("graphics.quality", "Get the current quality level")
                .handler(move |_| Ok(CommandOutput::Text(s.borrow().quality.clone())));

        let s = Rc::clone(&self.settings);
        let set_quality = CommandBuilder::new("graphics.quality", "Set the quality level")
            .param("level", quality_kind)
            .handler(move |args| {
                s.borrow_mut().quality = args[0].as_str()?.to_string();
                Ok(CommandOutput::None)
            });

        let s = Rc::clone(&self.settings);
        let get_resolution =
            CommandBuilder::new("graphics.resolution", "Get the current resolution")
                .handler(move |_| {
                    let settings = s.borrow();
                    Ok(CommandOutput::Text(format!(
                        "{}x{}",
                        settings.width, settings.height
                    )))
                });

        let s = Rc::clone(&self.settings);
        let set_resolution =
            CommandBuilder::new("graphics.resolution", "Set the resolution")
                .param("width", ParamKind::Int)
                .param("height", ParamKind::Int)
                .show_types_in_usage()
                .handler(move |args| {
                    let width = args[0].as_int()?;
                    let height = args[1].as_int()?;
                    if width <= 0 || height <= 0 {
                        return Err(ConsoleError::Invocation(
                            "resolution must be positive".to_string(),
                        ));
                    }
                    let mut settings = s.borrow_mut();
                    settings.width = width;
                    settings.height = height;
                    Ok(CommandOutput::None)
                });

        vec![
            get_fov,
            set_fov,
            fullscreen,
            get_quality,
            set_quality,
            get_resolution,
            set_resolution,
        ]
    }
}

/// Small free-standing commands: `say` (capture-all) and `add`.
pub struct ChatCommands;

impl CommandModule for ChatCommands {
    fn name(&self) -> &str {
        "chat"
    }

    fn commands(&self) -> Vec<CommandBuilder> {
        vec![
            CommandBuilder::new("say", "Repeat a line of text")
                .param("text", ParamKind::Opaque)
                .capture_all_params_as_one()
                .handler(|args| Ok(CommandOutput::Text(args[0].as_str()?.to_string()))),
            CommandBuilder::new("add", "Add two integers")
                .param("a", ParamKind::Int)
                .param("b", ParamKind::Int)
                .show_types_in_usage()
                .handler(|args| {
                    let sum = args[0].as_int()? + args[1].as_int()?;
                    Ok(CommandOutput::Text(sum.to_string()))
                }),
        ]
    }
}
