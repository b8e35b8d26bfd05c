//! Host session tying the house to its scene and avatar collaborators.

use housegen::{ConfigError, House, HouseConfig, HouseModel, HouseRng};
use tracing::{info, warn};

use crate::avatar::AvatarController;
use crate::preferences::{PreferenceError, PreferenceStore};
use crate::scene::SceneBuilder;

pub struct HouseSession<S, A> {
    house: House<HouseRng>,
    seed: u64,
    scene: S,
    avatar: A,
}

impl<S: SceneBuilder, A: AvatarController> HouseSession<S, A> {
    /// Generates the first house, builds its scene, and spawns the avatar.
    pub fn start(config: HouseConfig, seed: u64, scene: S, avatar: A) -> Result<Self, ConfigError> {
        let house = House::from_seed(config, seed)?;
        let mut session = Self { house, seed, scene, avatar };
        session.present();
        info!(seed, fingerprint = session.model().fingerprint(), "session started");
        Ok(session)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn house(&self) -> &House<HouseRng> {
        &self.house
    }

    pub fn model(&self) -> &HouseModel {
        self.house.model()
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn avatar(&self) -> &A {
        &self.avatar
    }

    /// Tears down the scene, rebuilds the house from the continuing stream, and respawns.
    pub fn regenerate(&mut self) -> &HouseModel {
        self.teardown();
        self.house.regenerate();
        self.present();
        info!(
            generation = self.house.generation(),
            fingerprint = self.model().fingerprint(),
            "house regenerated"
        );
        self.house.model()
    }

    /// Applies the stored configuration, if any, and regenerates with it.
    pub fn load_config(&mut self, store: &PreferenceStore) -> Result<bool, PreferenceError> {
        let Some(config) = store.load_config()? else {
            warn!(path = %store.path().display(), "no saved house configuration");
            return Ok(false);
        };
        self.teardown();
        let applied = self.house.reconfigure(config).map(|_| ());
        self.present();
        applied?;
        info!(generation = self.house.generation(), "saved configuration applied");
        Ok(true)
    }

    pub fn save_config(&self, store: &mut PreferenceStore) -> Result<(), PreferenceError> {
        store.save_config(self.house.config())
    }

    pub fn into_parts(self) -> (S, A) {
        (self.scene, self.avatar)
    }

    fn teardown(&mut self) {
        self.avatar.despawn();
        self.scene.clear();
    }

    fn present(&mut self) {
        self.scene.build(self.house.model());
        if let Some(spawn) = self.house.model().spawn {
            self.avatar.spawn(spawn);
        }
    }
}
