use vk_bootstrap::{list_layers, Entry};

pub fn main() -> vk_bootstrap::Result<()> {
    env_logger::init();

    let library = unsafe { Entry::load() }?;
    for layer in list_layers(&library)? {
        println!(" - {}", layer.name);
        println!("      {}", layer.description);
        println!("      spec vers : {}", layer.spec_version);
        println!("      impl vers : {}", layer.implementation_version);
    }

    Ok(())
}
