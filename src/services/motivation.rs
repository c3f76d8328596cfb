use rand::seq::SliceRandom;
use rand::Rng;

const OUTSTANDING: [&str; 4] = [
    "Outstanding performance! You're setting the bar high!",
    "Exceptional work! Your dedication truly shines!",
    "You're crushing it! Keep up the amazing work!",
    "Phenomenal results! You're a customer support superstar!",
];

const GREAT: [&str; 4] = [
    "Great job! Your hard work is paying off!",
    "Impressive performance! Keep it up!",
    "You're doing fantastic! The team appreciates you!",
    "Strong results! You're making a real difference!",
];

const GOOD: [&str; 4] = [
    "Good work! You're on the right track!",
    "Nice progress! Keep pushing forward!",
    "Solid performance! Every effort counts!",
    "Well done! Your customers appreciate you!",
];

const STARTED: [&str; 4] = [
    "Every journey begins with a single step. Keep going!",
    "You've qualified! Now let's aim higher!",
    "Great start! There's more potential to unlock!",
    "You're on the board! Build on this momentum!",
];

const ENCOURAGEMENT: [&str; 4] = [
    "Don't give up! Success is just around the corner!",
    "Every expert was once a beginner. Keep learning!",
    "Tomorrow is a new opportunity to excel!",
    "Challenges are what make life interesting. You've got this!",
];

pub fn messages_for_bonus(bonus: f64) -> &'static [&'static str] {
    if bonus >= 300.0 {
        &OUTSTANDING
    } else if bonus >= 200.0 {
        &GREAT
    } else if bonus >= 100.0 {
        &GOOD
    } else if bonus > 0.0 {
        &STARTED
    } else {
        &ENCOURAGEMENT
    }
}

pub fn motivational_message(bonus: f64) -> &'static str {
    let mut rng = rand::thread_rng();
    motivational_message_with_rng(bonus, &mut rng)
}

pub fn motivational_message_with_rng<R: Rng + ?Sized>(bonus: f64, rng: &mut R) -> &'static str {
    messages_for_bonus(bonus)
        .choose(rng)
        .copied()
        .unwrap_or(ENCOURAGEMENT[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn message_band_follows_bonus() {
        assert_eq!(messages_for_bonus(700.0), &OUTSTANDING);
        assert_eq!(messages_for_bonus(250.0), &GREAT);
        assert_eq!(messages_for_bonus(100.0), &GOOD);
        assert_eq!(messages_for_bonus(0.5), &STARTED);
        assert_eq!(messages_for_bonus(0.0), &ENCOURAGEMENT);
    }

    #[test]
    fn message_is_picked_from_the_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let message = motivational_message_with_rng(150.0, &mut rng);
            assert!(GOOD.contains(&message));
        }
    }
}
