// Entry point for the trunk build; everything lives in the library.

fn main() {
    training_guide::start();
}
