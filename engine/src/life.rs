use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub hp: u32,
    pub max_hp: u32,
}

impl Health {
    pub fn new(max_hp: u32) -> Self {
        Self { hp: max_hp, max_hp }
    }

    /// Starts below full; values above `max_hp` are clamped.
    pub fn starting_at(hp: u32, max_hp: u32) -> Self {
        Self { hp: hp.min(max_hp), max_hp }
    }

    pub fn is_down(&self) -> bool {
        self.hp == 0
    }

    /// Apply damage, clamping at 0. Returns true if the creature dropped to 0 this call.
    pub fn apply_damage(&mut self, name: &str, dmg: u32, mut log: impl FnMut(String)) -> bool {
        if self.is_down() {
            return false;
        }
        let before = self.hp;
        self.hp = self.hp.saturating_sub(dmg);
        log(format!("[DMG][{}] {} → {} (−{})", name, before, self.hp, dmg));
        if self.hp == 0 {
            log(format!("[STATE][{}] drops to 0 HP", name));
            return true;
        }
        false
    }

    /// Bar of `width` cells filled in proportion to remaining health.
    pub fn bar(&self, width: usize) -> String {
        let filled = if self.max_hp == 0 {
            0
        } else {
            (self.hp as usize * width) / self.max_hp as usize
        };
        format!("{}{}", "=".repeat(filled), " ".repeat(width - filled))
    }
}
