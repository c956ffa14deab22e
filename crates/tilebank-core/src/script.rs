//! Event scripts as a tagged command tree.
//!
//! The editor stores commands as a name plus a bag of optional arguments.
//! Conversion into [`Command`] happens once, at load time, so every later
//! pass matches on a variant instead of probing for argument presence.

use crate::project::Direction;
use crate::raw::{RawArgs, RawCommand};

pub const EVENT_END: &str = "EVENT_END";
pub const EVENT_TEXT: &str = "EVENT_TEXT";
pub const EVENT_SET_TRUE: &str = "EVENT_SET_TRUE";
pub const EVENT_SET_FALSE: &str = "EVENT_SET_FALSE";
pub const EVENT_IF_TRUE: &str = "EVENT_IF_TRUE";
pub const EVENT_SWITCH_SCENE: &str = "EVENT_SWITCH_SCENE";
pub const EVENT_WAIT: &str = "EVENT_WAIT";
pub const EVENT_CAMERA_SHAKE: &str = "EVENT_CAMERA_SHAKE";
pub const EVENT_MUSIC_PLAY: &str = "EVENT_MUSIC_PLAY";
pub const EVENT_MUSIC_STOP: &str = "EVENT_MUSIC_STOP";
pub const EVENT_LOAD_IMAGE: &str = "EVENT_LOAD_IMAGE";
pub const EVENT_ACTOR_SET_DIRECTION: &str = "EVENT_ACTOR_SET_DIRECTION";

/// Flag name used when a flag argument is present but empty.
pub const DEFAULT_FLAG: &str = "0";

const FRAMES_PER_SECOND: f64 = 60.0;
const DEFAULT_WAIT_SECONDS: f64 = 0.5;

/// Ordered list of commands owned by a scene, actor or trigger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script(Vec<Command>);

/// Arguments kept for commands this crate has no dedicated variant for.
///
/// Only the fields that feed asset pools are retained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArgs {
    pub flag: Option<String>,
    pub text: Option<String>,
    pub image_id: Option<String>,
    pub music_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    End,
    Text {
        text: String,
    },
    SetFlag {
        flag: String,
    },
    ClearFlag {
        flag: String,
    },
    IfFlag {
        flag: String,
        then: Script,
        otherwise: Script,
    },
    SwitchScene {
        scene_id: String,
        x: u8,
        y: u8,
        direction: Direction,
    },
    Wait {
        frames: u8,
    },
    CameraShake {
        frames: u8,
    },
    /// `None` plays the first track of the music catalog.
    PlayMusic {
        music_id: Option<String>,
    },
    StopMusic,
    LoadImage {
        image_id: String,
    },
    ActorSetDirection {
        actor_id: String,
        direction: Direction,
    },
    Custom {
        name: String,
        args: CommandArgs,
        children: Vec<Script>,
    },
}

impl Script {
    pub fn new(commands: Vec<Command>) -> Self {
        Self(commands)
    }

    pub fn commands(&self) -> &[Command] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A script with at most one command (the terminating `End`) does nothing.
    pub fn is_trivial(&self) -> bool {
        self.0.len() <= 1
    }

    /// Fold over every command of the tree in pre-order.
    ///
    /// Nested scripts are visited right after their parent command, the
    /// `then` branch before the `otherwise` branch.
    pub fn fold<A>(&self, init: A, f: &mut impl FnMut(A, &Command) -> A) -> A {
        self.0.iter().fold(init, |acc, command| {
            let acc = f(acc, command);
            command
                .children()
                .fold(acc, |acc, child| child.fold(acc, &mut *f))
        })
    }
}

impl From<Vec<Command>> for Script {
    fn from(commands: Vec<Command>) -> Self {
        Self(commands)
    }
}

impl From<Vec<RawCommand>> for Script {
    fn from(raw: Vec<RawCommand>) -> Self {
        Self(raw.into_iter().map(Command::from).collect())
    }
}

impl Command {
    /// Nested scripts owned by this command.
    pub fn children(&self) -> impl Iterator<Item = &Script> {
        let nested: &[Script] = match self {
            Command::Custom { children, .. } => children,
            _ => &[],
        };
        let branches = match self {
            Command::IfFlag {
                then, otherwise, ..
            } => [Some(then), Some(otherwise)],
            _ => [None, None],
        };
        branches.into_iter().flatten().chain(nested.iter())
    }

    /// Editor name of the command.
    pub fn name(&self) -> &str {
        match self {
            Command::End => EVENT_END,
            Command::Text { .. } => EVENT_TEXT,
            Command::SetFlag { .. } => EVENT_SET_TRUE,
            Command::ClearFlag { .. } => EVENT_SET_FALSE,
            Command::IfFlag { .. } => EVENT_IF_TRUE,
            Command::SwitchScene { .. } => EVENT_SWITCH_SCENE,
            Command::Wait { .. } => EVENT_WAIT,
            Command::CameraShake { .. } => EVENT_CAMERA_SHAKE,
            Command::PlayMusic { .. } => EVENT_MUSIC_PLAY,
            Command::StopMusic => EVENT_MUSIC_STOP,
            Command::LoadImage { .. } => EVENT_LOAD_IMAGE,
            Command::ActorSetDirection { .. } => EVENT_ACTOR_SET_DIRECTION,
            Command::Custom { name, .. } => name.as_str(),
        }
    }
}

impl From<RawCommand> for Command {
    fn from(raw: RawCommand) -> Self {
        let RawCommand {
            command,
            args,
            children,
        } = raw;
        let args = args.unwrap_or_default();
        let children = children.unwrap_or_default();

        match command.as_str() {
            EVENT_END => Command::End,
            EVENT_TEXT => Command::Text {
                text: args.text.unwrap_or_default(),
            },
            EVENT_SET_TRUE => Command::SetFlag {
                flag: flag_name(args.flag),
            },
            EVENT_SET_FALSE => Command::ClearFlag {
                flag: flag_name(args.flag),
            },
            EVENT_IF_TRUE => Command::IfFlag {
                flag: flag_name(args.flag),
                then: children.then.into(),
                otherwise: children.otherwise.into(),
            },
            EVENT_SWITCH_SCENE => Command::SwitchScene {
                scene_id: args.scene_id.unwrap_or_default(),
                x: args.x.unwrap_or(0),
                y: args.y.unwrap_or(0),
                direction: Direction::parse_or_default(args.direction.as_deref()),
            },
            EVENT_WAIT => Command::Wait {
                frames: seconds_to_frames(args.time),
            },
            EVENT_CAMERA_SHAKE => Command::CameraShake {
                frames: seconds_to_frames(args.time),
            },
            EVENT_MUSIC_PLAY => Command::PlayMusic {
                music_id: args.music_id.filter(|id| !id.is_empty()),
            },
            EVENT_MUSIC_STOP => Command::StopMusic,
            EVENT_LOAD_IMAGE => Command::LoadImage {
                image_id: args.image_id.unwrap_or_default(),
            },
            EVENT_ACTOR_SET_DIRECTION => Command::ActorSetDirection {
                actor_id: args.actor_id.unwrap_or_default(),
                direction: Direction::parse_or_default(args.direction.as_deref()),
            },
            _ => {
                let mut nested = Vec::new();
                if !children.then.is_empty() {
                    nested.push(children.then.into());
                }
                if !children.otherwise.is_empty() {
                    nested.push(children.otherwise.into());
                }
                Command::Custom {
                    name: command,
                    args: custom_args(args),
                    children: nested,
                }
            }
        }
    }
}

fn flag_name(flag: Option<String>) -> String {
    match flag {
        Some(flag) if !flag.is_empty() => flag,
        _ => DEFAULT_FLAG.to_string(),
    }
}

fn custom_args(args: RawArgs) -> CommandArgs {
    CommandArgs {
        flag: args.flag.map(|f| flag_name(Some(f))),
        text: args.text,
        image_id: args.image_id,
        music_id: args.music_id,
    }
}

fn seconds_to_frames(time: Option<f64>) -> u8 {
    let frames = (time.unwrap_or(DEFAULT_WAIT_SECONDS) * FRAMES_PER_SECOND).round();
    frames.clamp(0.0, f64::from(u8::MAX)) as u8
}
