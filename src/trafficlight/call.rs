/*
 * Pedestrian calls. A button press latches a call flag for its approach; the
 * flag stays set across any number of ticks and phases until the sequencer
 * decides the call has been served.
 */

use crate::surface::Buttons;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum Approach {
    NorthSouth,
    EastWest,
}

impl Approach {
    pub const BOTH: [Approach; 2] = [Approach::NorthSouth, Approach::EastWest];

    pub fn opposing(self) -> Approach {
        match self {
            Approach::NorthSouth => Approach::EastWest,
            Approach::EastWest => Approach::NorthSouth,
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub struct CallFlags {
    north_south: bool,
    east_west: bool,
}

impl CallFlags {
    pub const fn none() -> Self {
        CallFlags {
            north_south: false,
            east_west: false,
        }
    }

    pub fn is_set(&self, approach: Approach) -> bool {
        match approach {
            Approach::NorthSouth => self.north_south,
            Approach::EastWest => self.east_west,
        }
    }

    /*
     * Only ever sets flags. A released button leaves a pending call alone.
     */
    pub(crate) fn latch(&mut self, buttons: Buttons) {
        for approach in Approach::BOTH {
            if buttons.pressed(approach) && !self.is_set(approach) {
                debug!("call latched: {}", approach);
                *self.flag_mut(approach) = true;
            }
        }
    }

    // Only the sequencer may consume a call.
    pub(super) fn clear(&mut self, approach: Approach) {
        *self.flag_mut(approach) = false;
    }

    fn flag_mut(&mut self, approach: Approach) -> &mut bool {
        match approach {
            Approach::NorthSouth => &mut self.north_south,
            Approach::EastWest => &mut self.east_west,
        }
    }

    #[cfg(test)]
    pub(crate) fn with(approach: Approach) -> Self {
        let mut calls = CallFlags::none();
        *calls.flag_mut(approach) = true;
        calls
    }
}
