pub type Gen_Type = u32;

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Gen_Index {
    pub index: u32,
    pub gen: Gen_Type,
}

impl Gen_Index {
    pub const INVALID: Gen_Index = Gen_Index { index: 0, gen: 0 };
}

/// Hands out indices that stay unique across slot reuse: deallocating a slot
/// bumps its generation, so stale indices fail the `is_valid` check instead of
/// silently aliasing whatever got stored there next.
pub struct Gen_Allocator {
    // Current generation of the i-th slot. Starts at 1 so { 0, 0 } can be
    // used as "the invalid index".
    gens: Vec<Gen_Type>,
    alive: Vec<bool>,
    free_slots: Vec<u32>,
}

impl Gen_Allocator {
    pub fn with_capacity(cap: usize) -> Gen_Allocator {
        Gen_Allocator {
            gens: vec![1; cap],
            alive: vec![false; cap],
            free_slots: (0..cap as u32).rev().collect(),
        }
    }

    /// Slots currently available without growing.
    pub fn capacity(&self) -> usize {
        self.gens.len()
    }

    pub fn live_count(&self) -> usize {
        self.gens.len() - self.free_slots.len()
    }

    #[inline]
    pub fn is_valid(&self, idx: Gen_Index) -> bool {
        let slot = idx.index as usize;
        slot < self.gens.len() && idx.gen == self.gens[slot] && self.alive[slot]
    }

    #[inline]
    pub fn is_slot_live(&self, index: u32) -> bool {
        (index as usize) < self.alive.len() && self.alive[index as usize]
    }

    pub fn allocate(&mut self) -> Gen_Index {
        let slot = match self.free_slots.pop() {
            Some(s) => s as usize,
            None => {
                self.gens.push(1);
                self.alive.push(false);
                self.gens.len() - 1
            }
        };
        self.alive[slot] = true;
        Gen_Index {
            index: slot as u32,
            gen: self.gens[slot],
        }
    }

    pub fn deallocate(&mut self, idx: Gen_Index) {
        let slot = idx.index as usize;
        #[cfg(debug_assertions)]
        {
            if slot >= self.gens.len() {
                panic!("Tried to deallocate {:?}, past the last slot!", idx);
            }
            if self.gens[slot] != idx.gen {
                panic!(
                    "Tried to deallocate {:?} whose generation does not match the slot's ({})! Double free?",
                    idx, self.gens[slot]
                );
            }
            if !self.alive[slot] {
                panic!("Tried to deallocate {:?}, which was never allocated!", idx);
            }
        }
        self.gens[slot] += 1;
        self.alive[slot] = false;
        self.free_slots.push(idx.index);
    }
}
