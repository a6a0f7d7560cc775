pub mod buy_ins;
pub mod matches;
pub mod players;
pub mod rounds;

pub use buy_ins::Entity as BuyIns;
pub use buy_ins::Model as BuyIn;
pub use matches::Entity as Matches;
pub use matches::Model as Match;
pub use players::Entity as Players;
pub use players::Model as Player;
pub use rounds::Entity as Rounds;
pub use rounds::Model as Round;
