fn main() {
    bevy_brawler::game::run();
}
