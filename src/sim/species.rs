//! Species registry: immutable descriptors for every pet kind
//!
//! One `SpeciesDescriptor` per kind, built as static data - transition
//! graph, ability flags, color palette, greeting, and name pool. A single
//! [`super::creature::Creature`] type is parameterized by a descriptor
//! instead of subclassing per species.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::states::States;

/// Pet size class; scales sprite width and movement speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PetSize {
    #[default]
    Nano,
    Small,
    Medium,
    Large,
}

impl PetSize {
    /// Sprite width in pixels
    pub fn width(self) -> f32 {
        match self {
            PetSize::Nano => 30.0,
            PetSize::Small => 50.0,
            PetSize::Medium => 75.0,
            PetSize::Large => 100.0,
        }
    }

    /// Sprite height in pixels (square sprites)
    pub fn height(self) -> f32 {
        self.width()
    }

    /// Movement speed multiplier
    pub fn speed_multiplier(self) -> f32 {
        match self {
            PetSize::Nano => 0.75,
            PetSize::Small => 1.0,
            PetSize::Medium => 1.25,
            PetSize::Large => 1.5,
        }
    }
}

/// Color variants across all species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetColor {
    Brown,
    Black,
    White,
    Red,
    Akita,
    Gray,
    Purple,
    Green,
    Orange,
    Yellow,
    Blue,
    Pink,
    Magical,
}

impl PetColor {
    /// Lowercase name used in sprite paths
    pub fn as_str(self) -> &'static str {
        match self {
            PetColor::Brown => "brown",
            PetColor::Black => "black",
            PetColor::White => "white",
            PetColor::Red => "red",
            PetColor::Akita => "akita",
            PetColor::Gray => "gray",
            PetColor::Purple => "purple",
            PetColor::Green => "green",
            PetColor::Orange => "orange",
            PetColor::Yellow => "yellow",
            PetColor::Blue => "blue",
            PetColor::Pink => "pink",
            PetColor::Magical => "magical",
        }
    }
}

/// Implemented pet kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeciesKind {
    Dog,
    Crab,
    Chicken,
    Clippy,
    Fox,
    Snake,
    Snail,
    RubberDuck,
    Rocky,
    Squirrel,
    Turtle,
    Totoro,
}

/// One node of a species' state-transition graph
#[derive(Debug)]
pub struct SequenceNode {
    pub state: States,
    pub next: &'static [States],
}

/// A species' complete transition graph: starting state plus candidate
/// lists. States with no node fall back to the starting state - dead ends
/// loop to start by policy, not by accident.
#[derive(Debug)]
pub struct TransitionGraph {
    pub starting_state: States,
    pub nodes: &'static [SequenceNode],
}

impl TransitionGraph {
    /// Candidate next states registered for `from`, if any
    pub fn candidates(&self, from: States) -> Option<&'static [States]> {
        self.nodes
            .iter()
            .find(|n| n.state == from)
            .map(|n| n.next)
            .filter(|next| !next.is_empty())
    }

    /// Pick the next state after `from` completes: uniform over the
    /// registered candidates, falling back to the starting state
    pub fn next_state(&self, from: States, rng: &mut Pcg32) -> States {
        match self.candidates(from) {
            Some(next) => next[rng.random_range(0..next.len())],
            None => self.starting_state,
        }
    }
}

/// Immutable template for one pet kind
#[derive(Debug)]
pub struct SpeciesDescriptor {
    pub kind: SpeciesKind,
    /// Lowercase label used in sprite paths and logs
    pub label: &'static str,
    pub emoji: &'static str,
    /// Greeting line shown when the pet says hello or makes a friend
    pub hello: &'static str,
    /// Base speed in px/tick before size multiplier and spawn jitter
    pub base_speed: f32,
    pub can_swipe: bool,
    pub can_chase: bool,
    /// Wall climb rate in px/tick; 0 for grounded species
    pub climb_speed: f32,
    /// Maximum height above the floor a climber reaches
    pub climb_height: f32,
    /// Descent rate in px/tick when dropping off a wall
    pub fall_speed: f32,
    pub colors: &'static [PetColor],
    pub names: &'static [&'static str],
    pub graph: TransitionGraph,
}

// The common ground-pet graph shape: idle hub, walk/run loops back to it.
// Species that swipe or climb extend it below.

static DOG: SpeciesDescriptor = SpeciesDescriptor {
    kind: SpeciesKind::Dog,
    label: "dog",
    emoji: "\u{1F436}",
    hello: "Every dog has its day - and today is woof day! Take me on a walk",
    base_speed: 3.0,
    can_swipe: false,
    can_chase: true,
    climb_speed: 0.0,
    climb_height: 0.0,
    fall_speed: 3.2,
    colors: &[
        PetColor::Black,
        PetColor::Brown,
        PetColor::White,
        PetColor::Red,
        PetColor::Akita,
    ],
    names: &[
        "Bella", "Charlie", "Max", "Molly", "Coco", "Buddy", "Ruby", "Oscar", "Rex", "Snoopy",
        "Balto", "Hachiko", "Luna", "Shadow", "Bolt", "Odie",
    ],
    graph: TransitionGraph {
        starting_state: States::SitIdle,
        nodes: &[
            SequenceNode {
                state: States::SitIdle,
                next: &[States::WalkRight, States::RunRight, States::Lie],
            },
            SequenceNode {
                state: States::Lie,
                next: &[States::WalkRight, States::RunRight],
            },
            SequenceNode {
                state: States::WalkRight,
                next: &[States::WalkLeft, States::RunLeft],
            },
            SequenceNode {
                state: States::RunRight,
                next: &[States::WalkLeft, States::RunLeft],
            },
            SequenceNode {
                state: States::WalkLeft,
                next: &[
                    States::SitIdle,
                    States::Lie,
                    States::WalkRight,
                    States::RunRight,
                ],
            },
            SequenceNode {
                state: States::RunLeft,
                next: &[
                    States::SitIdle,
                    States::Lie,
                    States::WalkRight,
                    States::RunRight,
                ],
            },
            SequenceNode {
                state: States::Chase,
                next: &[States::IdleWithBall],
            },
            SequenceNode {
                state: States::IdleWithBall,
                next: &[
                    States::WalkRight,
                    States::WalkLeft,
                    States::RunLeft,
                    States::RunRight,
                ],
            },
        ],
    },
};

static CRAB: SpeciesDescriptor = SpeciesDescriptor {
    kind: SpeciesKind::Crab,
    label: "crab",
    emoji: "\u{1F980}",
    hello: "Hi, I'm Crabsolutely Clawsome Crab \u{1F44B}!",
    base_speed: 3.0,
    can_swipe: false,
    can_chase: true,
    climb_speed: 0.0,
    climb_height: 0.0,
    fall_speed: 3.2,
    colors: &[PetColor::Red],
    names: &[
        "Ferris",
        "Pinchy",
        "Crabby",
        "Mr. Krabs",
        "Shelly",
        "Santa Claws",
        "Clawdia",
        "Scuttle",
        "Sebastian",
        "Leonardo DaPinchy",
    ],
    graph: TransitionGraph {
        starting_state: States::SitIdle,
        nodes: &[
            SequenceNode {
                state: States::SitIdle,
                next: &[States::WalkRight, States::RunRight],
            },
            SequenceNode {
                state: States::WalkRight,
                next: &[States::WalkLeft, States::RunLeft],
            },
            SequenceNode {
                state: States::RunRight,
                next: &[States::WalkLeft, States::RunLeft],
            },
            SequenceNode {
                state: States::WalkLeft,
                next: &[States::SitIdle],
            },
            SequenceNode {
                state: States::RunLeft,
                next: &[States::SitIdle],
            },
            SequenceNode {
                state: States::Chase,
                next: &[States::IdleWithBall],
            },
            SequenceNode {
                state: States::IdleWithBall,
                next: &[
                    States::WalkRight,
                    States::WalkLeft,
                    States::RunLeft,
                    States::RunRight,
                ],
            },
        ],
    },
};

static CHICKEN: SpeciesDescriptor = SpeciesDescriptor {
    kind: SpeciesKind::Chicken,
    label: "chicken",
    emoji: "\u{1F414}",
    hello: "Puk Puk Pukaaak - just let me lay my egg. \u{1F95A}",
    base_speed: 3.0,
    can_swipe: true,
    can_chase: true,
    climb_speed: 0.0,
    climb_height: 0.0,
    fall_speed: 3.2,
    colors: &[PetColor::White],
    names: &[
        "Hen Solo",
        "Cluck Vader",
        "Obi Wan Henobi",
        "Albert Eggstein",
        "Cluck Norris",
        "Nugget",
        "Pip",
        "Rosie",
    ],
    graph: TransitionGraph {
        starting_state: States::SitIdle,
        nodes: &[
            SequenceNode {
                state: States::SitIdle,
                next: &[States::WalkRight, States::RunRight, States::Swipe],
            },
            SequenceNode {
                state: States::WalkRight,
                next: &[States::WalkLeft, States::RunLeft],
            },
            SequenceNode {
                state: States::RunRight,
                next: &[States::WalkLeft, States::RunLeft],
            },
            SequenceNode {
                state: States::WalkLeft,
                next: &[States::SitIdle],
            },
            SequenceNode {
                state: States::RunLeft,
                next: &[States::SitIdle],
            },
            SequenceNode {
                state: States::Chase,
                next: &[States::IdleWithBall],
            },
            SequenceNode {
                state: States::Swipe,
                next: &[States::SitIdle],
            },
            SequenceNode {
                state: States::IdleWithBall,
                next: &[
                    States::WalkRight,
                    States::WalkLeft,
                    States::RunLeft,
                    States::RunRight,
                    States::Swipe,
                ],
            },
        ],
    },
};

static CLIPPY: SpeciesDescriptor = SpeciesDescriptor {
    kind: SpeciesKind::Clippy,
    label: "clippy",
    emoji: "\u{1F4CE}",
    hello: "Hi, I'm Clippy, would you like some assistance today? \u{1F44B}",
    base_speed: 3.0,
    can_swipe: false,
    can_chase: true,
    climb_speed: 0.0,
    climb_height: 0.0,
    fall_speed: 3.2,
    colors: &[
        PetColor::Black,
        PetColor::Brown,
        PetColor::Green,
        PetColor::Yellow,
    ],
    names: &["Clippy", "Karl Klammer", "Clippy Jr.", "Coco", "Buddy"],
    graph: TransitionGraph {
        starting_state: States::SitIdle,
        nodes: &[
            SequenceNode {
                state: States::SitIdle,
                next: &[States::WalkRight, States::RunRight],
            },
            SequenceNode {
                state: States::WalkRight,
                next: &[States::WalkLeft, States::RunLeft],
            },
            SequenceNode {
                state: States::RunRight,
                next: &[States::WalkLeft, States::RunLeft],
            },
            SequenceNode {
                state: States::WalkLeft,
                next: &[States::SitIdle],
            },
            SequenceNode {
                state: States::RunLeft,
                next: &[States::SitIdle],
            },
            SequenceNode {
                state: States::Chase,
                next: &[States::IdleWithBall],
            },
            SequenceNode {
                state: States::IdleWithBall,
                next: &[
                    States::WalkRight,
                    States::WalkLeft,
                    States::RunLeft,
                    States::RunRight,
                ],
            },
        ],
    },
};

static FOX: SpeciesDescriptor = SpeciesDescriptor {
    kind: SpeciesKind::Fox,
    label: "fox",
    emoji: "\u{1F98A}",
    hello: "fox says hello",
    base_speed: 3.0,
    can_swipe: false,
    can_chase: true,
    climb_speed: 0.0,
    climb_height: 0.0,
    fall_speed: 3.2,
    colors: &[PetColor::Red, PetColor::White],
    names: &[
        "Cinnamon", "Ginger", "Todd", "Foxy", "Ember", "Sonic", "Vixen", "Rusty", "Maple",
        "Paprika",
    ],
    graph: TransitionGraph {
        starting_state: States::SitIdle,
        nodes: &[
            SequenceNode {
                state: States::SitIdle,
                next: &[States::WalkRight, States::RunRight],
            },
            SequenceNode {
                state: States::WalkRight,
                next: &[States::WalkLeft, States::RunLeft, States::RunRight],
            },
            SequenceNode {
                state: States::RunRight,
                next: &[States::WalkLeft, States::RunLeft],
            },
            SequenceNode {
                state: States::WalkLeft,
                next: &[States::SitIdle, States::RunRight],
            },
            SequenceNode {
                state: States::RunLeft,
                next: &[States::SitIdle, States::RunRight],
            },
            SequenceNode {
                state: States::Chase,
                next: &[States::IdleWithBall],
            },
            SequenceNode {
                state: States::IdleWithBall,
                next: &[States::RunLeft, States::RunRight],
            },
        ],
    },
};

static SNAKE: SpeciesDescriptor = SpeciesDescriptor {
    kind: SpeciesKind::Snake,
    label: "snake",
    emoji: "\u{1F40D}",
    hello: "Sssssss... I'm just here to ssslither around. Don't mind me! \u{1F40D}",
    base_speed: 3.0,
    can_swipe: true,
    can_chase: true,
    climb_speed: 0.0,
    climb_height: 0.0,
    fall_speed: 3.2,
    colors: &[PetColor::Green],
    names: &[
        "Slinky",
        "Monty",
        "Kaa",
        "Nagini",
        "Noodle",
        "Danger Noodle",
        "Julius Squeezer",
        "Severus",
    ],
    graph: TransitionGraph {
        starting_state: States::SitIdle,
        nodes: &[
            SequenceNode {
                state: States::SitIdle,
                next: &[States::WalkRight, States::RunRight, States::Swipe],
            },
            SequenceNode {
                state: States::WalkRight,
                next: &[States::WalkLeft, States::RunLeft],
            },
            SequenceNode {
                state: States::RunRight,
                next: &[States::WalkLeft, States::RunLeft],
            },
            SequenceNode {
                state: States::WalkLeft,
                next: &[States::SitIdle],
            },
            SequenceNode {
                state: States::RunLeft,
                next: &[States::SitIdle],
            },
            SequenceNode {
                state: States::Chase,
                next: &[States::IdleWithBall],
            },
            SequenceNode {
                state: States::Swipe,
                next: &[States::SitIdle],
            },
            SequenceNode {
                state: States::IdleWithBall,
                next: &[
                    States::WalkRight,
                    States::WalkLeft,
                    States::RunLeft,
                    States::RunRight,
                    States::Swipe,
                ],
            },
        ],
    },
};

static SNAIL: SpeciesDescriptor = SpeciesDescriptor {
    kind: SpeciesKind::Snail,
    label: "snail",
    emoji: "\u{1F40C}",
    hello: "I may be slow, but I always get there eventually! \u{1F40C}",
    base_speed: 1.0,
    can_swipe: true,
    can_chase: true,
    climb_speed: 0.0,
    climb_height: 0.0,
    fall_speed: 2.0,
    colors: &[PetColor::Brown],
    names: &[
        "Slowpoke", "Gary", "Turbo", "Shelly", "Sheldon", "Escargot", "Pierre", "Helix",
    ],
    graph: TransitionGraph {
        starting_state: States::SitIdle,
        nodes: &[
            SequenceNode {
                state: States::SitIdle,
                next: &[States::WalkRight, States::Swipe],
            },
            SequenceNode {
                state: States::WalkRight,
                next: &[States::WalkLeft],
            },
            SequenceNode {
                state: States::WalkLeft,
                next: &[States::SitIdle],
            },
            SequenceNode {
                state: States::Chase,
                next: &[States::IdleWithBall],
            },
            SequenceNode {
                state: States::Swipe,
                next: &[States::SitIdle],
            },
            SequenceNode {
                state: States::IdleWithBall,
                next: &[States::WalkRight, States::WalkLeft, States::Swipe],
            },
        ],
    },
};

static RUBBER_DUCK: SpeciesDescriptor = SpeciesDescriptor {
    kind: SpeciesKind::RubberDuck,
    label: "rubber-duck",
    emoji: "\u{1F986}",
    hello: "Quack! Tell me about your code and I'll help you debug it! \u{1F986}",
    base_speed: 3.0,
    can_swipe: true,
    can_chase: true,
    climb_speed: 0.0,
    climb_height: 0.0,
    fall_speed: 3.2,
    colors: &[PetColor::Yellow],
    names: &[
        "Debugger", "Quacky", "CodeDuck", "Compiler", "Syntax", "Waddles", "Puddles", "Howard",
    ],
    graph: TransitionGraph {
        starting_state: States::SitIdle,
        nodes: &[
            SequenceNode {
                state: States::SitIdle,
                next: &[States::WalkRight, States::RunRight, States::Swipe],
            },
            SequenceNode {
                state: States::WalkRight,
                next: &[States::WalkLeft, States::RunLeft],
            },
            SequenceNode {
                state: States::RunRight,
                next: &[States::WalkLeft, States::RunLeft],
            },
            SequenceNode {
                state: States::WalkLeft,
                next: &[States::SitIdle],
            },
            SequenceNode {
                state: States::RunLeft,
                next: &[States::SitIdle],
            },
            SequenceNode {
                state: States::Chase,
                next: &[States::IdleWithBall],
            },
            SequenceNode {
                state: States::Swipe,
                next: &[States::SitIdle],
            },
            SequenceNode {
                state: States::IdleWithBall,
                next: &[
                    States::WalkRight,
                    States::WalkLeft,
                    States::RunLeft,
                    States::RunRight,
                    States::Swipe,
                ],
            },
        ],
    },
};

static ROCKY: SpeciesDescriptor = SpeciesDescriptor {
    kind: SpeciesKind::Rocky,
    label: "rocky",
    emoji: "\u{1FAA8}",
    hello: "I'm a rock. I don't do much.",
    base_speed: 1.5,
    can_swipe: false,
    // Rocks do not fetch
    can_chase: false,
    climb_speed: 0.0,
    climb_height: 0.0,
    fall_speed: 2.0,
    colors: &[PetColor::Gray],
    names: &["Rocky", "Dwayne", "Boulder", "Pebbles", "Sisyphus", "Granite"],
    graph: TransitionGraph {
        starting_state: States::SitIdle,
        nodes: &[
            SequenceNode {
                state: States::SitIdle,
                next: &[States::SitIdle, States::WalkRight],
            },
            SequenceNode {
                state: States::WalkRight,
                next: &[States::WalkLeft, States::SitIdle],
            },
            SequenceNode {
                state: States::WalkLeft,
                next: &[States::SitIdle],
            },
        ],
    },
};

static SQUIRREL: SpeciesDescriptor = SpeciesDescriptor {
    kind: SpeciesKind::Squirrel,
    label: "squirrel",
    emoji: "\u{1F43F}",
    hello: "Got any nuts?!",
    base_speed: 3.0,
    can_swipe: true,
    can_chase: true,
    climb_speed: 7.0,
    climb_height: 150.0,
    fall_speed: 15.0,
    colors: &[
        PetColor::Gray,
        PetColor::Black,
        PetColor::Brown,
        PetColor::Purple,
        PetColor::White,
    ],
    names: &[
        "Twiggy", "Scrat", "Rocky", "Sandy", "Slappy", "Conker", "Nutkin", "Acorn", "Hazel",
        "Peanut", "Bruce", "Eleanor",
    ],
    graph: TransitionGraph {
        starting_state: States::SitIdle,
        nodes: &[
            SequenceNode {
                state: States::SitIdle,
                next: &[States::WalkRight, States::WalkLeft],
            },
            SequenceNode {
                state: States::StandRight,
                next: &[States::WalkRight, States::RunRight, States::WalkLeft],
            },
            SequenceNode {
                state: States::StandLeft,
                next: &[
                    States::WalkLeft,
                    States::RunLeft,
                    States::WalkRight,
                    States::ClimbWallLeft,
                ],
            },
            SequenceNode {
                state: States::WalkRight,
                next: &[
                    States::StandRight,
                    States::RunRight,
                    States::WalkLeft,
                    States::WalkRight,
                ],
            },
            SequenceNode {
                state: States::WalkLeft,
                next: &[
                    States::StandLeft,
                    States::RunLeft,
                    States::ClimbWallLeft,
                    States::WalkRight,
                    States::WalkLeft,
                ],
            },
            SequenceNode {
                state: States::RunRight,
                next: &[
                    States::RunLeft,
                    States::WalkRight,
                    States::WalkRight,
                    States::StandRight,
                ],
            },
            SequenceNode {
                state: States::RunLeft,
                next: &[
                    States::RunRight,
                    States::WalkLeft,
                    States::WalkLeft,
                    States::StandLeft,
                    States::ClimbWallLeft,
                ],
            },
            SequenceNode {
                state: States::ClimbWallLeft,
                next: &[States::WallDigLeft],
            },
            SequenceNode {
                state: States::WallDigLeft,
                next: &[States::WallNap],
            },
            SequenceNode {
                state: States::WallNap,
                next: &[States::WallHangLeft],
            },
            SequenceNode {
                state: States::WallHangLeft,
                next: &[States::JumpDownLeft],
            },
            SequenceNode {
                state: States::JumpDownLeft,
                next: &[States::Land],
            },
            SequenceNode {
                state: States::Land,
                next: &[States::SitIdle, States::RunRight],
            },
            SequenceNode {
                state: States::Chase,
                next: &[States::IdleWithBall],
            },
            SequenceNode {
                state: States::Swipe,
                next: &[States::SitIdle],
            },
            SequenceNode {
                state: States::IdleWithBall,
                next: &[States::RunRight, States::RunLeft],
            },
        ],
    },
};

static TURTLE: SpeciesDescriptor = SpeciesDescriptor {
    kind: SpeciesKind::Turtle,
    label: "turtle",
    emoji: "\u{1F422}",
    hello: "Slow and steady wins the race! \u{1F422}",
    base_speed: 2.0,
    can_swipe: false,
    can_chase: true,
    climb_speed: 0.0,
    climb_height: 0.0,
    fall_speed: 2.5,
    colors: &[PetColor::Green, PetColor::Orange],
    names: &[
        "Shelley",
        "Franklin",
        "Crush",
        "Squirt",
        "Donatello",
        "Leonardo",
        "Raphael",
        "Michelangelo",
        "Bowser",
        "Turbo",
    ],
    graph: TransitionGraph {
        starting_state: States::SitIdle,
        nodes: &[
            SequenceNode {
                state: States::SitIdle,
                next: &[States::WalkRight, States::RunRight, States::Lie],
            },
            SequenceNode {
                state: States::Lie,
                next: &[States::WalkRight, States::RunRight],
            },
            SequenceNode {
                state: States::WalkRight,
                next: &[States::WalkLeft, States::RunLeft],
            },
            SequenceNode {
                state: States::RunRight,
                next: &[States::WalkLeft, States::RunLeft],
            },
            SequenceNode {
                state: States::WalkLeft,
                next: &[
                    States::SitIdle,
                    States::Lie,
                    States::WalkRight,
                    States::RunRight,
                ],
            },
            SequenceNode {
                state: States::RunLeft,
                next: &[
                    States::SitIdle,
                    States::Lie,
                    States::WalkRight,
                    States::RunRight,
                ],
            },
            SequenceNode {
                state: States::Chase,
                next: &[States::IdleWithBall],
            },
            SequenceNode {
                state: States::IdleWithBall,
                next: &[
                    States::WalkRight,
                    States::WalkLeft,
                    States::RunLeft,
                    States::RunRight,
                    States::Lie,
                ],
            },
        ],
    },
};

static TOTORO: SpeciesDescriptor = SpeciesDescriptor {
    kind: SpeciesKind::Totoro,
    label: "totoro",
    emoji: "\u{1F331}",
    hello: "Try Laughing. Then Whatever Scares You Will Go Away. \u{1F3AD}",
    base_speed: 3.0,
    can_swipe: false,
    can_chase: true,
    climb_speed: 0.2,
    climb_height: 100.0,
    fall_speed: 3.2,
    colors: &[PetColor::Gray],
    names: &["Totoro", "Max", "Molly", "Coco", "Big fella"],
    graph: TransitionGraph {
        starting_state: States::SitIdle,
        nodes: &[
            SequenceNode {
                state: States::SitIdle,
                next: &[States::WalkRight, States::Lie],
            },
            SequenceNode {
                state: States::Lie,
                next: &[States::WalkRight, States::WalkLeft],
            },
            SequenceNode {
                state: States::WalkRight,
                next: &[States::WalkLeft, States::SitIdle],
            },
            SequenceNode {
                state: States::WalkLeft,
                next: &[States::SitIdle, States::ClimbWallLeft, States::SitIdle],
            },
            SequenceNode {
                state: States::ClimbWallLeft,
                next: &[States::WallHangLeft],
            },
            SequenceNode {
                state: States::WallHangLeft,
                next: &[States::JumpDownLeft],
            },
            SequenceNode {
                state: States::JumpDownLeft,
                next: &[States::Land],
            },
            SequenceNode {
                state: States::Land,
                next: &[States::SitIdle, States::WalkRight, States::Lie],
            },
            SequenceNode {
                state: States::Chase,
                next: &[States::IdleWithBall],
            },
            SequenceNode {
                state: States::IdleWithBall,
                next: &[States::WalkRight, States::WalkLeft],
            },
        ],
    },
};

/// Every implemented species, in menu order
pub const ALL_SPECIES: &[SpeciesKind] = &[
    SpeciesKind::Dog,
    SpeciesKind::Crab,
    SpeciesKind::Chicken,
    SpeciesKind::Clippy,
    SpeciesKind::Fox,
    SpeciesKind::Snake,
    SpeciesKind::Snail,
    SpeciesKind::RubberDuck,
    SpeciesKind::Rocky,
    SpeciesKind::Squirrel,
    SpeciesKind::Turtle,
    SpeciesKind::Totoro,
];

/// Resolve a species by its menu/storage name. Names the registry does
/// not implement yield `None` with a logged error; the caller falls back
/// to a default.
pub fn lookup(name: &str) -> Option<SpeciesKind> {
    let found = ALL_SPECIES
        .iter()
        .copied()
        .find(|kind| descriptor(*kind).label == name);
    if found.is_none() {
        log::error!("pet type {name} not yet implemented");
    }
    found
}

/// Look up the immutable descriptor for a species
pub fn descriptor(kind: SpeciesKind) -> &'static SpeciesDescriptor {
    match kind {
        SpeciesKind::Dog => &DOG,
        SpeciesKind::Crab => &CRAB,
        SpeciesKind::Chicken => &CHICKEN,
        SpeciesKind::Clippy => &CLIPPY,
        SpeciesKind::Fox => &FOX,
        SpeciesKind::Snake => &SNAKE,
        SpeciesKind::Snail => &SNAIL,
        SpeciesKind::RubberDuck => &RUBBER_DUCK,
        SpeciesKind::Rocky => &ROCKY,
        SpeciesKind::Squirrel => &SQUIRREL,
        SpeciesKind::Turtle => &TURTLE,
        SpeciesKind::Totoro => &TOTORO,
    }
}

/// Ordered color palette for a species
pub fn available_colors(kind: SpeciesKind) -> &'static [PetColor] {
    descriptor(kind).colors
}

/// Ordered name pool for a species
pub fn available_names(kind: SpeciesKind) -> &'static [&'static str] {
    descriptor(kind).names
}

/// Draw a random display name from the species pool
pub fn random_name(kind: SpeciesKind, rng: &mut Pcg32) -> &'static str {
    let names = available_names(kind);
    names[rng.random_range(0..names.len())]
}

/// Validate a requested color against the species palette, substituting the
/// first available color (with a warning) when it is not in the palette.
pub fn resolve_color(kind: SpeciesKind, want: PetColor) -> PetColor {
    let colors = available_colors(kind);
    if colors.contains(&want) {
        want
    } else {
        let fallback = colors[0];
        log::warn!(
            "color {} not available for {}, using {}",
            want.as_str(),
            descriptor(kind).label,
            fallback.as_str()
        );
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_next_state_drawn_from_candidate_list() {
        let mut rng = rng();
        for kind in ALL_SPECIES {
            let graph = &descriptor(*kind).graph;
            for node in graph.nodes {
                for _ in 0..20 {
                    let next = graph.next_state(node.state, &mut rng);
                    assert!(
                        node.next.contains(&next),
                        "{:?}: {:?} not in candidates of {:?}",
                        kind,
                        next,
                        node.state
                    );
                }
            }
        }
    }

    #[test]
    fn test_unregistered_state_falls_back_to_start() {
        let mut rng = rng();
        // Dog has no node for Land
        let graph = &descriptor(SpeciesKind::Dog).graph;
        assert_eq!(graph.next_state(States::Land, &mut rng), States::SitIdle);
    }

    #[test]
    fn test_single_candidate_is_forced() {
        let mut rng = rng();
        let graph = &descriptor(SpeciesKind::Squirrel).graph;
        for _ in 0..10 {
            assert_eq!(
                graph.next_state(States::ClimbWallLeft, &mut rng),
                States::WallDigLeft
            );
        }
    }

    #[test]
    fn test_every_reachable_state_resolves() {
        // Walk each graph from the start; every reachable state either has
        // an outgoing node or falls back to the starting state.
        let mut rng = rng();
        for kind in ALL_SPECIES {
            let graph = &descriptor(*kind).graph;
            let mut state = graph.starting_state;
            for _ in 0..500 {
                state = graph.next_state(state, &mut rng);
            }
        }
    }

    #[test]
    fn test_color_fallback_substitutes_first() {
        assert_eq!(
            resolve_color(SpeciesKind::Crab, PetColor::Purple),
            PetColor::Red
        );
        assert_eq!(
            resolve_color(SpeciesKind::Dog, PetColor::Akita),
            PetColor::Akita
        );
    }

    #[test]
    fn test_random_name_from_pool() {
        let mut rng = rng();
        for _ in 0..20 {
            let name = random_name(SpeciesKind::Fox, &mut rng);
            assert!(available_names(SpeciesKind::Fox).contains(&name));
        }
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(lookup("dog"), Some(SpeciesKind::Dog));
        assert_eq!(lookup("rubber-duck"), Some(SpeciesKind::RubberDuck));
        assert_eq!(lookup("dragon"), None);
    }

    #[test]
    fn test_every_species_has_colors_and_names() {
        for kind in ALL_SPECIES {
            assert!(!available_colors(*kind).is_empty());
            assert!(!available_names(*kind).is_empty());
        }
    }
}
