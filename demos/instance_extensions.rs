use vk_bootstrap::{list_extensions, Entry};

pub fn main() -> vk_bootstrap::Result<()> {
    env_logger::init();

    let library = unsafe { Entry::load() }?;
    for extension in list_extensions(&library)? {
        println!(" - {}", extension.name);
        println!("      spec vers : {}", extension.spec_version);
    }

    Ok(())
}
