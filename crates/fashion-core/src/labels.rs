/// Number of output classes.
pub const NUM_CLASSES: usize = 10;

/// Fashion-MNIST class names, in the model's output index order.
pub const CLASS_LABELS: [&str; NUM_CLASSES] = [
    "T-shirt/top",
    "Trouser",
    "Pullover",
    "Dress",
    "Coat",
    "Sandal",
    "Shirt",
    "Sneaker",
    "Bag",
    "Ankle boot",
];

/// Label for a class index, if it is in range.
pub fn label_for(index: usize) -> Option<&'static str> {
    CLASS_LABELS.get(index).copied()
}
